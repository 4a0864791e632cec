//! Form encoding and XML decoding for the EC2 query protocol.

use base64::{Engine, engine::general_purpose::STANDARD};
use once_cell::sync::Lazy;
use regex::Regex;
use shared::api::{
    InstanceStateChange, RunInstancesRequest, RunInstancesResponse, TerminateInstancesResponse,
};
use url::form_urlencoded;

use super::errors::ApiError;

pub const API_VERSION: &str = "2016-11-15";

static ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<item>(.*?)</item>").unwrap());
static INSTANCE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<instanceId>\s*([^<\s]+)\s*</instanceId>").unwrap());
static CURRENT_STATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<currentState>.*?<name>\s*([^<]*?)\s*</name>").unwrap());
static PREVIOUS_STATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<previousState>.*?<name>\s*([^<]*?)\s*</name>").unwrap());
static RESERVATION_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<reservationId>\s*([^<\s]+)\s*</reservationId>").unwrap());
static ERROR_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<Code>([^<]*)</Code>").unwrap());
static ERROR_MESSAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<Message>(.*?)</Message>").unwrap());

pub fn terminate_instances_body(instance_ids: &[String]) -> String {
    let mut form = form_urlencoded::Serializer::new(String::new());
    form.append_pair("Action", "TerminateInstances")
        .append_pair("Version", API_VERSION);
    for (i, id) in instance_ids.iter().enumerate() {
        form.append_pair(&format!("InstanceId.{}", i + 1), id);
    }
    form.finish()
}

pub fn run_instances_body(req: &RunInstancesRequest) -> String {
    let mut form = form_urlencoded::Serializer::new(String::new());
    form.append_pair("Action", "RunInstances")
        .append_pair("Version", API_VERSION)
        .append_pair("ImageId", &req.image_id)
        .append_pair("InstanceType", &req.instance_type)
        .append_pair("MinCount", "1")
        .append_pair("MaxCount", "1");
    if let Some(profile) = &req.iam_instance_profile {
        form.append_pair("IamInstanceProfile.Name", profile);
    }
    if let Some(key) = &req.key_name {
        form.append_pair("KeyName", key);
    }
    for (i, group) in req.security_group_ids.iter().enumerate() {
        form.append_pair(&format!("SecurityGroupId.{}", i + 1), group);
    }
    if let Some(user_data) = &req.user_data {
        form.append_pair("UserData", &STANDARD.encode(user_data));
    }
    form.finish()
}

pub fn parse_terminate_instances(xml: &str) -> Result<TerminateInstancesResponse, ApiError> {
    let instances = ITEM
        .captures_iter(xml)
        .filter_map(|item| {
            let body = item.get(1)?.as_str();
            Some(InstanceStateChange {
                instance_id: first_capture(&INSTANCE_ID, body)?,
                current_state: first_capture(&CURRENT_STATE, body),
                previous_state: first_capture(&PREVIOUS_STATE, body),
            })
        })
        .collect::<Vec<_>>();

    if instances.is_empty() {
        return Err(ApiError::Decode(
            "TerminateInstances response lists no instances".to_string(),
        ));
    }
    Ok(TerminateInstancesResponse { instances })
}

pub fn parse_run_instances(xml: &str) -> Result<RunInstancesResponse, ApiError> {
    let mut instance_ids: Vec<String> = Vec::new();
    for c in INSTANCE_ID.captures_iter(xml) {
        let id = c[1].to_string();
        if !instance_ids.contains(&id) {
            instance_ids.push(id);
        }
    }
    if instance_ids.is_empty() {
        return Err(ApiError::Decode(
            "RunInstances response lists no instances".to_string(),
        ));
    }
    Ok(RunInstancesResponse {
        reservation_id: first_capture(&RESERVATION_ID, xml),
        instance_ids,
    })
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|c| unescape(&c[1]))
}

/// Decodes the predefined XML entities.
fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Extracts the first `<Error>` of a query protocol error document.
pub fn parse_error(status: u16, xml: &str) -> ApiError {
    let code = first_capture(&ERROR_CODE, xml).unwrap_or_else(|| format!("HTTP {}", status));
    let message = first_capture(&ERROR_MESSAGE, xml)
        .map(|m| m.trim().to_string())
        .unwrap_or_else(|| xml.trim().to_string());
    ApiError::Service {
        status,
        code,
        message,
    }
}
