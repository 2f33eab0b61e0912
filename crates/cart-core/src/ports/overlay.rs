/// The modal overlay that hosts the cart.
pub trait Overlay {
    fn open(&mut self);
    fn close(&mut self);
    /// Returns the overlay to its initial, closed state.
    fn reset(&mut self);
}
