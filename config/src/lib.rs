pub mod paths;
pub mod settings;

pub use paths::BuildContext;
pub use settings::Settings;

/// Load environment variables from .env files.
/// The project .env (current directory) is read before ~/.env; dotenv never
/// overwrites a variable that is already set, so project values win.
pub fn load_env_file() {
    dotenv::dotenv().ok();

    if let Some(home) = dirs::home_dir() {
        dotenv::from_path(home.join(".env")).ok();
    }
}
