//! User-facing strings shown by the account pages

pub const LOGIN_FIELDS_REQUIRED: &str = "Username dan password tidak boleh kosong.";
pub const LOGIN_SUCCEEDED: &str = "Login berhasil! Mengalihkan...";
pub const LOGIN_WRONG_PASSWORD: &str = "Password salah. Silakan coba lagi.";
pub const LOGIN_UNKNOWN_USER: &str = "Username tidak ditemukan.";
pub const LOGIN_FAILED: &str = "Login gagal. Periksa kembali data kamu.";
pub const REGISTER_FAILED: &str = "Registrasi gagal. Periksa kembali data kamu.";
pub const NETWORK_ERROR: &str = "Terjadi kesalahan jaringan. Coba lagi nanti.";
pub const DELETE_USER_FAILED: &str = "Gagal menghapus user!";

pub const LOGIN_BUTTON_IDLE: &str = "Login";
pub const LOGIN_BUTTON_BUSY: &str = "Logging in...";

/// Why the server turned a login down, guessed from its message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFailure {
    WrongPassword,
    UnknownUser,
    /// Non-empty server message with no recognised keyword
    Other(String),
    Unspecified,
}

impl LoginFailure {
    /// Keyword match on the lowercased server message; "password" wins over "not found"
    pub fn classify(message: Option<&str>) -> Self {
        let Some(message) = message.filter(|m| !m.is_empty()) else {
            return LoginFailure::Unspecified;
        };

        let lowered = message.to_lowercase();
        if lowered.contains("password") {
            LoginFailure::WrongPassword
        } else if lowered.contains("not found") {
            LoginFailure::UnknownUser
        } else {
            LoginFailure::Other(message.to_string())
        }
    }

    pub fn user_message(&self) -> &str {
        match self {
            LoginFailure::WrongPassword => LOGIN_WRONG_PASSWORD,
            LoginFailure::UnknownUser => LOGIN_UNKNOWN_USER,
            LoginFailure::Other(message) => message,
            LoginFailure::Unspecified => LOGIN_FAILED,
        }
    }
}
