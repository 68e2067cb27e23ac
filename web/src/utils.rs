use memtile_core::ClientError;

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Desyncs block the player with an alert, refusals are only logged.
pub(crate) fn report(err: &ClientError) {
    if err.is_surfaced() {
        log::error!("{}", err);
        gloo::dialogs::alert(&err.to_string());
    } else {
        log::warn!("{}", err);
    }
}
