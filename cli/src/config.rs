use std::{env, time::Duration};

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_INSTANCE_TYPE: &str = "t2.micro";
const DEFAULT_INSTANCE_PROFILE: &str = "ecsInstanceRole";

/// Static credentials used to sign requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// How new container instance hosts are launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub image_id: Option<String>,
    pub instance_type: String,
    pub instance_profile: Option<String>,
    pub key_name: Option<String>,
    pub security_group: Option<String>,
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub region: String,
    pub credentials: Option<Credentials>,
    pub ecs_endpoint: String,
    pub ec2_endpoint: String,
    pub wait_delay: Duration,
    pub wait_max_attempts: u32,
    pub launch: LaunchConfig,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// Falls back to defaults when applicable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(region) = lookup("AWS_REGION").or_else(|| lookup("AWS_DEFAULT_REGION")) {
            config.set_region(&region);
        }

        if let (Some(access_key_id), Some(secret_access_key)) =
            (lookup("AWS_ACCESS_KEY_ID"), lookup("AWS_SECRET_ACCESS_KEY"))
        {
            config.credentials = Some(Credentials {
                access_key_id,
                secret_access_key,
                session_token: lookup("AWS_SESSION_TOKEN"),
            });
        }

        if let Some(url) = lookup("ECS_PILOT_ECS_ENDPOINT") {
            config.ecs_endpoint = url;
        }
        if let Some(url) = lookup("ECS_PILOT_EC2_ENDPOINT") {
            config.ec2_endpoint = url;
        }

        if let Some(secs) = lookup("ECS_PILOT_WAIT_DELAY").and_then(|s| s.parse::<u64>().ok()) {
            config.wait_delay = Duration::from_secs(secs);
        }
        if let Some(val) = lookup("ECS_PILOT_WAIT_ATTEMPTS").and_then(|s| s.parse().ok()) {
            config.wait_max_attempts = val;
        }

        config.launch.image_id = lookup("ECS_PILOT_AMI");
        if let Some(val) = lookup("ECS_PILOT_INSTANCE_TYPE") {
            config.launch.instance_type = val;
        }
        if let Some(val) = lookup("ECS_PILOT_INSTANCE_PROFILE") {
            config.launch.instance_profile = Some(val);
        }
        config.launch.key_name = lookup("ECS_PILOT_KEY_NAME");
        config.launch.security_group = lookup("ECS_PILOT_SECURITY_GROUP");

        config
    }

    /// Switches region, moving the default endpoints along with it.
    pub fn set_region(&mut self, region: &str) {
        if self.ecs_endpoint == default_endpoint("ecs", &self.region) {
            self.ecs_endpoint = default_endpoint("ecs", region);
        }
        if self.ec2_endpoint == default_endpoint("ec2", &self.region) {
            self.ec2_endpoint = default_endpoint("ec2", region);
        }
        self.region = region.to_string();
    }
}

fn default_endpoint(service: &str, region: &str) -> String {
    format!("https://{}.{}.amazonaws.com", service, region)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            credentials: None,
            ecs_endpoint: default_endpoint("ecs", DEFAULT_REGION),
            ec2_endpoint: default_endpoint("ec2", DEFAULT_REGION),
            wait_delay: Duration::from_secs(6),
            wait_max_attempts: 100,
            launch: LaunchConfig {
                image_id: None,
                instance_type: DEFAULT_INSTANCE_TYPE.to_string(),
                instance_profile: Some(DEFAULT_INSTANCE_PROFILE.to_string()),
                key_name: None,
                security_group: None,
            },
        }
    }
}
