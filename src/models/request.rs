use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Rating is a plain number in the body; zero is what serde leaves behind for a
// missing field, so it counts as "not provided".
fn validate_rating(rating: f64) -> Result<(), ValidationError> {
    if rating == 0.0 || !rating.is_finite() {
        let mut err = ValidationError::new("required");
        err.message = Some("rating is a required field".into());
        return Err(err);
    }
    Ok(())
}

/// Body of create and update calls. `id` is never read from the body; for
/// updates it comes from the path, for inserts it is filled in afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CakeRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(default)]
    #[validate(length(min = 1, code = "required", message = "title is a required field"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(
        min = 1,
        code = "required",
        message = "description is a required field"
    ))]
    pub description: String,
    #[serde(default)]
    #[validate(custom(function = "validate_rating"))]
    pub rating: f64,
    #[serde(default)]
    #[validate(length(min = 1, code = "required", message = "image is a required field"))]
    pub image: String,
}

/// Query-string filters for listing cakes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindAllRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CakeRequest {
        CakeRequest {
            id: 0,
            title: "Lemon cheesecake".to_string(),
            description: "A cheesecake made of lemon".to_string(),
            rating: 7.0,
            image: "https://img.example.com/lemon.jpg".to_string(),
        }
    }

    #[test]
    fn complete_request_passes_validation() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn empty_fields_are_reported_per_field() {
        let req = CakeRequest {
            title: String::new(),
            rating: 0.0,
            ..valid_request()
        };

        let errs = req.validate().unwrap_err();
        let fields = errs.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("rating"));
        assert!(!fields.contains_key("description"));
        assert!(!fields.contains_key("image"));
    }

    #[test]
    fn rating_must_be_a_finite_non_zero_number() {
        for rating in [0.0, f64::NAN, f64::INFINITY] {
            let req = CakeRequest {
                rating,
                ..valid_request()
            };
            let errs = req.validate().unwrap_err();
            let fields = errs.field_errors();
            assert_eq!(fields["rating"][0].code, "required");
        }

        let negative = CakeRequest {
            rating: -1.5,
            ..valid_request()
        };
        assert!(negative.validate().is_ok());
    }

    #[test]
    fn id_is_not_decoded_from_body() {
        let req: CakeRequest = serde_json::from_str(
            r#"{"id": 99, "title": "t", "description": "d", "rating": 1.5, "image": "i"}"#,
        )
        .unwrap();
        assert_eq!(req.id, 0);
        assert_eq!(req.rating, 1.5);
    }
}
