pub mod claims;
pub mod errors;
pub mod jwt;
pub mod manager;
pub mod paseto;

pub use claims::TokenClaims;
pub use errors::TokenError;
pub use jwt::JwtTokenCodec;
pub use manager::TokenBackend;
pub use manager::TokenConfig;
pub use manager::TokenManager;
pub use paseto::PasetoTokenCodec;
