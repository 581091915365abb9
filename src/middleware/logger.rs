use super::middleware::{create_middleware, Middleware};
use tracing::info;

/// Built-in middleware that logs each write as it arrives.
///
/// Emits an `info` event on the `observact::logger` target with the domain
/// key, the value currently stored and the incoming value.
pub fn logger_middleware() -> Middleware {
    create_middleware(
        |ctx| {
            let key = ctx.incoming_mutation.key;
            let current = ctx.store.get(key)?;
            info!(
                target: "observact::logger",
                key,
                current = %current,
                incoming = %ctx.incoming_mutation.value,
                "incoming mutation"
            );
            Ok(())
        },
        "logstore",
    )
}
