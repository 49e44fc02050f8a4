use uuid::Uuid;

use crate::domain::photo::entities::ImageBlob;

#[derive(Debug, Clone)]
pub struct AnalyzeLabelInput {
    pub request_id: Uuid,
    pub image: Option<ImageBlob>,
}
