use config::{Config, ConfigError, File};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

mod toast;
pub use toast::ToastConfig;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[allow(unused)]
pub struct Configuration {
    pub toast: ToastConfig,
}

lazy_static! {
    pub static ref CONFIG: RwLock<Configuration> = RwLock::new(Configuration::new().unwrap());
}

impl Configuration {
    fn new() -> Result<Self, ConfigError> {
        Self::from_files(&["toast.toml", "devel.toml"])
    }

    /// Layer the given files (in order, all optional) over the defaults.
    pub fn from_files(paths: &[&str]) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&Configuration::default())?);

        for path in paths {
            builder = builder.add_source(File::with_name(path).required(false));
        }

        builder.build()?.try_deserialize()
    }
}

#[macro_export]
macro_rules! read_config {
    ($($field:ident).+) => {
        toast_config::CONFIG.read().unwrap().$($field).+
    };
}
