//! JWT claims, numeric dates and claim validators

pub mod jwt_claims;
pub mod numeric_date;
pub mod validation;
pub mod validator;

pub use jwt_claims::JwtClaims;
pub use numeric_date::NumericDate;
pub use validation::NumericDateValidator;
pub use validator::{AudValidator, IssValidator, JtiValidator, SubValidator, Validator};
