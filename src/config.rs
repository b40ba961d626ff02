use std::env;

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub secret_key: String,
    pub base_url: String,
    pub static_dir: String,
    pub templates_dir: String,
    pub mail: MailConfig,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub api_key: String,
    pub endpoint: String,
    pub sender: String,
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    fn get_env_or(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        EnvConfig {
            port: Self::get_env_or("PORT", "8080").parse().unwrap_or(8080),
            db_url: Self::get_env("DATABASE_URL"),
            secret_key: Self::get_env("SECRET_KEY"),
            base_url: Self::get_env_or("BASE_URL", "http://localhost:8080"),
            static_dir: Self::get_env_or("STATIC_DIR", "static"),
            templates_dir: Self::get_env_or("TEMPLATES_DIR", "templates"),
            mail: MailConfig {
                api_key: Self::get_env("RESEND_KEY"),
                endpoint: Self::get_env_or("MAIL_ENDPOINT", "https://api.resend.com/emails"),
                sender: Self::get_env_or("MAIL_SENDER", "noreply@quillpress.dev"),
            },
        }
    }
}
