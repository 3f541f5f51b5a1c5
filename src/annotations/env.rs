pub const SUPABASE_URL: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";

#[macro_export]
macro_rules! warn_if_setting_is_missing {
    ($setting:expr, $var:expr, $message:expr) => {
        if $setting.is_none() {
            tracing::warn!(
                "Neither `--{}` nor the `{}` environment variable is set. {}",
                $var.to_lowercase().replace('_', "-"),
                $var,
                $message
            );
        }
    };
}
