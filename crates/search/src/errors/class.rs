/// How a failed lookup affects a resolution outcome.
///
/// Used by the resolver to decide whether a probe error is counted.
///
/// | Class | Counted in `error_count`? | Other probes affected? |
/// |-------|---------------------------|------------------------|
/// | `Absent` | No | No |
/// | `Failure` | Yes, once per probe | No |
/// | `Rejected` | No | Resolution short-circuits before any probe runs |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutcomeClass {
    /// The interpretation does not exist on the ledger (HTTP 404).
    /// A confirmed absence is a normal outcome.
    Absent,

    /// The lookup could not be completed: transport error, server error,
    /// unreadable payload or a failing domain name service.
    Failure,

    /// The input itself was rejected before any lookup.
    /// Caller mistake, not a resolution error.
    Rejected,
}
