//! TRANSPORT TESTS
//!
//! Runs the real client against a wiremock server: protocol headers, signing headers,
//! error mapping, pagination and the EC2 query codec.

mod common;

use common::utils::client_for;
use ecs_pilot::adapter::{clusters, tasks};
use ecs_pilot::client::{ApiError, Ec2Api, EcsApi};
use serde_json::json;
use shared::api::DescribeTasksRequest;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, body_string_contains, header, header_exists, method, path},
};

#[tokio::test]
async fn test_json_protocol_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header(
            "x-amz-target",
            "AmazonEC2ContainerServiceV20141113.DescribeTasks",
        ))
        .and(header("content-type", "application/x-amz-json-1.1"))
        .and(header_exists("authorization"))
        .and(header_exists("x-amz-date"))
        .and(body_partial_json(json!({"cluster": "prod", "tasks": ["arn:task:1"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tasks": [{"taskArn": "arn:task:1", "lastStatus": "RUNNING"}],
            "failures": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resp = client
        .describe_tasks(DescribeTasksRequest {
            cluster: "prod".to_string(),
            tasks: vec!["arn:task:1".to_string()],
        })
        .await
        .unwrap();
    assert_eq!(resp.tasks[0].last_status.as_deref(), Some("RUNNING"));

    let requests = server.received_requests().await.unwrap();
    let auth = requests[0].headers.get("authorization").unwrap().to_str().unwrap();
    assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
    assert!(auth.contains("/us-east-1/ecs/aws4_request"));
}

#[tokio::test]
async fn test_service_error_is_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "com.amazonaws.ecs#ClusterNotFoundException",
            "message": "Cluster not found."
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = clusters::describe_cluster(&client, "ghost").await.unwrap_err();
    assert_eq!(err.to_string(), "ClusterNotFoundException: Cluster not found.");
}

#[tokio::test]
async fn test_list_follows_next_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"nextToken": "page-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "taskArns": ["arn:task:3"]
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"cluster": "prod", "maxResults": 100})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "taskArns": ["arn:task:1", "arn:task:2"],
            "nextToken": "page-2"
        })))
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let arns = tasks::list_tasks(&client, "prod").await.unwrap();
    assert_eq!(arns, vec!["arn:task:1", "arn:task:2", "arn:task:3"]);
}

#[tokio::test]
async fn test_undecodable_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .list_clusters(Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_terminate_instances_query_protocol() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("Action=TerminateInstances"))
        .and(body_string_contains("Version=2016-11-15"))
        .and(body_string_contains("InstanceId.1=i-0abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<TerminateInstancesResponse xmlns="http://ec2.amazonaws.com/doc/2016-11-15/">
  <requestId>59dbff89-35bd-4eac-99ed-be587EXAMPLE</requestId>
  <instancesSet>
    <item>
      <instanceId>i-0abc</instanceId>
      <currentState><code>32</code><name>shutting-down</name></currentState>
      <previousState><code>16</code><name>running</name></previousState>
    </item>
  </instancesSet>
</TerminateInstancesResponse>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resp = client
        .terminate_instances(vec!["i-0abc".to_string()])
        .await
        .unwrap();
    assert_eq!(resp.instances[0].instance_id, "i-0abc");
    assert_eq!(resp.instances[0].current_state.as_deref(), Some("shutting-down"));
}

#[tokio::test]
async fn test_query_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            "<Response><Errors><Error><Code>InvalidInstanceID.NotFound</Code>\
             <Message>The instance ID 'i-0abc' does not exist</Message></Error></Errors></Response>",
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .terminate_instances(vec!["i-0abc".to_string()])
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "InvalidInstanceID.NotFound: The instance ID 'i-0abc' does not exist"
    );
}
