//! Identity equality for entities.

/// An object defined by a stable identifier rather than by its attributes.
///
/// Two entities are the same entity when their identifiers are equal,
/// regardless of any other state they carry.
///
/// # Examples
///
/// ```
/// use taskwright::kernel::domain::Entity;
///
/// struct Account {
///     id: u32,
///     balance: i64,
/// }
///
/// impl Entity for Account {
///     type Id = u32;
///
///     fn id(&self) -> &Self::Id {
///         &self.id
///     }
/// }
///
/// let before = Account { id: 7, balance: 10 };
/// let after = Account { id: 7, balance: 99 };
/// assert!(before.same_identity_as(&after));
/// ```
pub trait Entity {
    /// Identifier type. Its own equality defines entity equality.
    type Id: Eq;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Returns `true` when both entities carry the same identifier.
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
