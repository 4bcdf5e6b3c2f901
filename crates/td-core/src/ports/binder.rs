/// Re-attaches the page's own event handlers after wizard markup changed.
///
/// Called strictly after the new markup's scripts were activated.
pub trait HandlerBinderPort {
    fn rebind(&self);
}
