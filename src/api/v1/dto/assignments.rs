/*
 * Responsibility
 * - volunteer assignment の request DTO
 * - validate() は形式チェックのみ (存在確認などは外部の永続化層)
 */
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AssignVolunteerRequest {
    #[serde(default, rename = "userId")]
    pub user_id: String,
}

impl AssignVolunteerRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.user_id.trim().is_empty() {
            return Err("userId is required");
        }
        Ok(())
    }
}

pub const ASSIGNMENT_STATUSES: [&str; 3] = ["accepted", "tentative", "declined"];

#[derive(Debug, Deserialize)]
pub struct UpdateAssignmentStatusRequest {
    #[serde(default)]
    pub status: String,
}

impl UpdateAssignmentStatusRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !ASSIGNMENT_STATUSES.contains(&self.status.as_str()) {
            return Err("status must be one of accepted, tentative, declined");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_must_be_known() {
        for status in ASSIGNMENT_STATUSES {
            let req = UpdateAssignmentStatusRequest {
                status: status.to_string(),
            };
            assert!(req.validate().is_ok());
        }

        let req = UpdateAssignmentStatusRequest {
            status: "Accepted".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn user_id_is_required() {
        let req: AssignVolunteerRequest = serde_json::from_str(r#"{"userId": " "}"#).unwrap();
        assert!(req.validate().is_err());

        let req: AssignVolunteerRequest = serde_json::from_str(r#"{"userId": "u-1"}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn absent_fields_reach_validation() {
        let req: AssignVolunteerRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.validate(), Err("userId is required"));

        let req: UpdateAssignmentStatusRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());
    }
}
