mod whatlang_identifier;

pub use whatlang_identifier::WhatlangIdentifier;
