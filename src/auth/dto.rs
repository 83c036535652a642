use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for POST /signup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Request body for POST /signin.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Response for a successful signup. Never carries the secret or its hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub email: String,
}

/// Response for a successful signin.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
}

/// Identity echo returned by GET /me.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: Uuid,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_request_accepts_optional_names() {
        let req: SignupRequest =
            serde_json::from_str(r#"{"email":"a@b.com","password":"secret1"}"#).unwrap();
        assert_eq!(req.email, "a@b.com");
        assert_eq!(req.first_name, "");
        assert_eq!(req.last_name, "");

        let req: SignupRequest = serde_json::from_str(
            r#"{"email":"a@b.com","password":"secret1","firstName":"Dan","lastName":"Shoe"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name, "Dan");
        assert_eq!(req.last_name, "Shoe");
    }

    #[test]
    fn responses_use_camel_case_keys() {
        let json = serde_json::to_string(&SigninResponse {
            token: "t".into(),
            user_id: Uuid::new_v4(),
            email: "a@b.com".into(),
        })
        .unwrap();
        assert!(json.contains("userId"));
        assert!(json.contains("token"));
        assert!(!json.contains("password"));
    }
}
