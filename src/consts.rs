// src/consts.rs
//! Shared constants: cipher parameters, storage keys and generator alphabets

/// AES-256 key size in bytes
pub const KEY_LEN: usize = 32;

/// AES-GCM nonce size in bytes (96 bit)
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag size in bytes, appended to every ciphertext
pub const TAG_LEN: usize = 16;

/// Storage key holding the exported encryption key
pub const DEFAULT_KEY_MATERIAL_KEY: &str = "vault_encryption_key";

/// Storage key holding the serialized entry list
pub const DEFAULT_ENTRIES_KEY: &str = "vault_entries";

/// JWK `alg` value for the vault key
pub const JWK_ALG_A256GCM: &str = "A256GCM";

/// Hex characters shown when logging a key fingerprint
pub const FINGERPRINT_HEX_LEN: usize = 16;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Visually ambiguous characters removed by `exclude_lookalikes`.
///
/// This is the classic `i l 1 L o 0 O` set plus uppercase `I`. Without `I`
/// an "exclude lookalikes" password could still contain `I`, which reads
/// the same as `l` in many fonts.
pub const LOOKALIKES: &str = "iIl1Lo0O";

/// Generator length range offered to interactive users
pub const MIN_UI_LENGTH: usize = 8;
pub const MAX_UI_LENGTH: usize = 32;

/// Default generated password length
pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

/// Default config file name, overridable through `CV_CONFIG`
pub const DEFAULT_CONFIG_FILE: &str = "credential-vault.toml";

/// Directory name under the platform data dir
pub const DEFAULT_DATA_DIR_NAME: &str = "credential-vault";
