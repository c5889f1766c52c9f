pub mod factory;
pub mod token;

pub use factory::build_token_verifier;
pub use token::TokenVerifier;
