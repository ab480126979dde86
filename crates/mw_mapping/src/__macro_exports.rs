//! Items used by the code `#[derive(Mapped)]` generates. Not public API.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::registry::MappingRegistry;

    /// One `#[mapping(auto_register)]` type.
    pub struct AutoRegistration(pub fn(&mut MappingRegistry));

    inventory::collect!(AutoRegistration);

    // Submitted once by this crate. Seeing it proves the platform collects
    // `inventory` submissions.
    struct Available;

    inventory::collect!(Available);
    inventory::submit!(Available);

    pub fn register_types(registry: &mut MappingRegistry) -> bool {
        if inventory::iter::<Available>.into_iter().next().is_none() {
            return false;
        }
        for registration in inventory::iter::<AutoRegistration> {
            (registration.0)(registry);
        }
        true
    }
}
