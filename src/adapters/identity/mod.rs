//! Identity adapters - implementations of the `IdentityValidator` port.

mod http_validator;
mod static_validator;

pub use http_validator::{HttpIdentityValidator, HttpIdentityValidatorConfig};
pub use static_validator::StaticIdentityValidator;
