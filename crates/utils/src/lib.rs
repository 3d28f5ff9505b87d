use rand::{distributions::Alphanumeric, Rng};

/// Creates a random alphanumeric secret, e.g. for signing tokens when
/// no secret has been configured.
pub fn create_random_secret(secret_len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}
