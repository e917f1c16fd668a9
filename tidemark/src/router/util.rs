use tidemark_core::TidemarkError;

/// Collapse a set of provider errors into a uniform `TidemarkError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If all errors are `ProviderTimeout` → `AllProvidersTimedOut(capability)`.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - Else → `AllProvidersFailed(errors)`.
pub fn collapse_errors(
    capability: &str,
    attempted_any: bool,
    errors: Vec<TidemarkError>,
    not_found_what: Option<String>,
) -> TidemarkError {
    if !attempted_any {
        return TidemarkError::unsupported(capability);
    }
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, TidemarkError::ProviderTimeout { .. }))
    {
        return TidemarkError::AllProvidersTimedOut {
            capability: capability.to_string(),
        };
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, TidemarkError::NotFound { .. }))
    {
        return TidemarkError::not_found(what);
    }
    TidemarkError::AllProvidersFailed(errors)
}

/// Short, log-friendly reason for an attempt that fell through.
pub(crate) fn failure_reason(e: &TidemarkError) -> String {
    match e {
        TidemarkError::AllProvidersFailed(inner) if inner.len() == 1 => inner[0].to_string(),
        other => other.to_string(),
    }
}
