use serde_json::Value;
use thiserror::Error;

/// Why a star value was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatingError {
    #[error("stars must be an integer, got {0}")]
    NotAnInteger(String),
    #[error("stars must be between 1 and 5, got {0}")]
    OutOfRange(i64),
}

/// A validated star rating, 1 to 5 inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stars(u8);

impl Stars {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Stars {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Stars(value as u8))
        } else {
            Err(RatingError::OutOfRange(value))
        }
    }
}

impl TryFrom<&Value> for Stars {
    type Error = RatingError;

    /// Accepts JSON integers and integer strings (form submissions).
    /// Fractional numbers, booleans, null, and other strings are rejected.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Stars::try_from(i),
                None => Err(RatingError::NotAnInteger(n.to_string())),
            },
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| RatingError::NotAnInteger(format!("{:?}", s)))
                .and_then(Stars::try_from),
            other => Err(RatingError::NotAnInteger(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_one_through_five() {
        for stars in 1i64..=5 {
            assert_eq!(Stars::try_from(stars).unwrap().get() as i64, stars);
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(Stars::try_from(0i64), Err(RatingError::OutOfRange(0)));
        assert_eq!(Stars::try_from(6i64), Err(RatingError::OutOfRange(6)));
        assert_eq!(Stars::try_from(-1i64), Err(RatingError::OutOfRange(-1)));
    }

    #[test]
    fn test_json_values() {
        assert_eq!(Stars::try_from(&json!(3)).unwrap().get(), 3);
        assert_eq!(Stars::try_from(&json!(" 5 ")).unwrap().get(), 5);

        assert!(matches!(
            Stars::try_from(&json!(3.5)),
            Err(RatingError::NotAnInteger(_))
        ));
        assert!(matches!(
            Stars::try_from(&json!(4.0)),
            Err(RatingError::NotAnInteger(_))
        ));
        assert!(matches!(
            Stars::try_from(&json!("four")),
            Err(RatingError::NotAnInteger(_))
        ));
        assert!(matches!(
            Stars::try_from(&json!(true)),
            Err(RatingError::NotAnInteger(_))
        ));
        assert!(matches!(
            Stars::try_from(&json!(null)),
            Err(RatingError::NotAnInteger(_))
        ));
        assert_eq!(
            Stars::try_from(&json!(9)),
            Err(RatingError::OutOfRange(9))
        );
    }
}
