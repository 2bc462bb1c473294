//! Control sampling traits
//!
//! Each monitor in `faceplate-core` owns one backend and asks it for the
//! raw state of every control once per `process()` call. Controls are
//! addressed by a dense index `0 .. N`.

/// Source of raw button states
///
/// Implementations report the instantaneous, undebounced level.
pub trait ButtonBackend {
    /// Returns true if the button `id` currently reads as pressed
    fn is_pressed(&mut self, id: u16) -> bool;
}

/// Source of potentiometer positions
pub trait PotBackend {
    /// Returns the position of pot `id` in the range `0.0 ..= 1.0`
    fn value(&mut self, id: u16) -> f32;
}

/// Source of quadrature encoder levels
pub trait EncoderBackend {
    /// Returns the (A, B) channel levels of encoder `id`
    fn levels(&mut self, id: u16) -> (bool, bool);
}

impl<T: ButtonBackend + ?Sized> ButtonBackend for &mut T {
    fn is_pressed(&mut self, id: u16) -> bool {
        (**self).is_pressed(id)
    }
}

impl<T: PotBackend + ?Sized> PotBackend for &mut T {
    fn value(&mut self, id: u16) -> f32 {
        (**self).value(id)
    }
}

impl<T: EncoderBackend + ?Sized> EncoderBackend for &mut T {
    fn levels(&mut self, id: u16) -> (bool, bool) {
        (**self).levels(id)
    }
}
