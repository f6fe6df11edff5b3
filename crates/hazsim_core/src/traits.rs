/// A continuous dynamical system dx/dt = f(t, x).
///
/// Implementations must be pure: `apply` may not mutate anything besides
/// the output buffer, so the same `(t, x)` always produces the same
/// derivatives. The integration driver relies on this when it re-evaluates
/// rejected steps.
pub trait DynamicalSystem {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates the vector field.
    /// x: current state
    /// t: current time
    /// out: buffer to write the derivative values (length `dimension()`)
    fn apply(&self, t: f64, x: &[f64], out: &mut [f64]);
}
