use poem_openapi::payload::Json;

use business::domain::shared::value_objects::DeviceId;

use crate::api::error::ErrorResponse;

pub fn parse_device_id(raw: &str) -> Result<DeviceId, Json<ErrorResponse>> {
    DeviceId::parse(raw).ok_or_else(|| ErrorResponse::validation("device.invalid_id"))
}
