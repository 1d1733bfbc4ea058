#[macro_export]
macro_rules! settings {
    ($api_type:expr, $name:expr, $endpoint:expr) => {
        Settings {
            api_type: $api_type,
            name: String::from($name),
            endpoint: String::from($endpoint),
            username: None,
            password: None,
        }
    };
}
