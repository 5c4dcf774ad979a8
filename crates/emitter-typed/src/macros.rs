//! Contract declaration macro.

/// Declares a contract type together with its event markers.
///
/// Expands to the contract struct, one marker struct per event with its
/// [`Event`](crate::Event) impl, and the [`Declares`](crate::Declares)
/// impls tying them together. Everything generated is compile-time only.
///
/// ```
/// use emitter_typed::{events, TypedEmitter};
///
/// pub struct PingPayload {
///     pub n: u32,
/// }
///
/// events! {
///     /// Events the demo application understands.
///     pub contract AppEvents {
///         /// A ping with a sequence number.
///         Ping("ping") => PingPayload,
///         /// A bare clock tick.
///         Tick("tick") => (),
///     }
/// }
///
/// let emitter = TypedEmitter::<AppEvents>::new();
/// emitter.on::<Ping, _>(|p| println!("ping {}", p.n)).unwrap();
/// emitter.fire::<Ping>(&PingPayload { n: 1 });
/// emitter.fire::<Tick>(&());
/// ```
#[macro_export]
macro_rules! events {
    (
        $(#[$contract_meta:meta])*
        $vis:vis contract $contract:ident {
            $(
                $(#[$event_meta:meta])*
                $event:ident($name:literal) => $payload:ty
            ),+ $(,)?
        }
    ) => {
        $(#[$contract_meta])*
        #[derive(Debug, Clone, Copy)]
        $vis struct $contract;

        impl $crate::Contract for $contract {}

        $(
            $(#[$event_meta])*
            #[derive(Debug, Clone, Copy)]
            $vis struct $event;

            impl $crate::Event for $event {
                const NAME: &'static str = $name;
                type Payload = $payload;
            }

            impl $crate::Declares<$event> for $contract {}
        )+
    };
}
