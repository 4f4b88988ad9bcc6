use std::{env, fmt, fs};

use serde::Deserialize;

#[derive(Deserialize, Debug, PartialEq)]
pub enum ServiceMode {
    Product,
    Dev,
    Local,
    Test, //for testcase
}

impl std::str::FromStr for ServiceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(ServiceMode::Product),
            "dev" => Ok(ServiceMode::Dev),
            "local" => Ok(ServiceMode::Local),
            "test" => Ok(ServiceMode::Test),
            _ => Err("Don't support this service mode".to_string()),
        }
    }
}

impl fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            ServiceMode::Product => "product",
            ServiceMode::Dev => "dev",
            ServiceMode::Local => "local",
            ServiceMode::Test => "test",
        };
        write!(f, "{}", description)
    }
}

#[derive(Deserialize, Debug)]
pub struct Database {
    pub host: String,
    pub port: u32,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

impl Database {
    pub fn db_uri(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={}",
            self.host, self.port, self.user, self.password, self.dbname
        )
    }
}

///read config data for env
#[derive(Deserialize, Debug)]
pub struct EnvConf {
    /// dev or pro
    pub service_mode: ServiceMode,
    /// http service port
    pub api_port: usize,
    /// base uri the scheduler posts settlement requests to
    pub settle_api_base_uri: String,
    /// completed-deposit sum a referred user must reach, minor units
    pub reward_threshold: u64,
    /// wallet credit per rewarded referral, minor units
    pub reward_amount: u64,
    /// pause between scheduler sweeps, in seconds
    pub settle_interval_secs: u64,
    pub database: Database,
}

lazy_static! {
    pub static ref CONF: EnvConf = {
        let content = fs::read_to_string(
            env::var_os("CONFIG").expect("CONFIG environment variable required"),
        )
        .expect("Unable to read the `CONFIG` specified file");
        toml::from_str(content.as_str()).expect("contents of configuration file invalid")
    };
    pub static ref TOKEN_SECRET_KEY: String = {
        if let Some(value) = env::var_os("TOKEN_SECRET_KEY") {
            value.to_str().unwrap().parse().unwrap()
        } else {
            "your_secret_key".to_string()
        }
    };
}
