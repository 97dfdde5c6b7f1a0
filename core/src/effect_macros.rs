//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when returning `Effect::Future` from a
//! reducer.

/// Create an `Effect::Future` from an async block
///
/// The block must evaluate to `Option<Action>`; a `Some` is fed back into
/// the reducer by the runtime.
///
/// # Example
///
/// ```rust,ignore
/// use shopping_list_core::async_effect;
///
/// async_effect! {
///     let record = storage.get("shoppingList").await;
///     Some(ListAction::Hydrated { record })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Future` that runs for its side effect only
///
/// The block's value is discarded and no action is fed back. Failures must be
/// handled (logged) inside the block.
///
/// # Example
///
/// ```rust,ignore
/// use shopping_list_core::fire_and_forget;
///
/// fire_and_forget! {
///     writer.write(revision, items).await;
/// }
/// ```
#[macro_export]
macro_rules! fire_and_forget {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move {
                { $($body)* };
                ::std::option::Option::None
            })
        )
    };
}
