mod generative_capability;
mod preference_storage;

pub use generative_capability::IGenerativeCapability;
pub use preference_storage::IPreferenceStorage;
