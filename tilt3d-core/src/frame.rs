//! Per-frame state: the held orientation and the frame it produces
use crate::error::SourceError;
use crate::geometry::SolidKind;
use crate::raster::Framebuffer;
use crate::render::{render_frame, Scene};
use crate::sensor::OrientationSource;
use crate::transform::Orientation;

/// Everything one frame step reads and writes, minus the display
#[derive(Debug, Clone)]
pub struct FrameState {
    scene: Scene,
    orientation: Orientation,
    framebuffer: Framebuffer,
}

impl FrameState {
    pub fn new(scene: Scene, width: usize, height: usize) -> Self {
        Self {
            scene,
            orientation: Orientation::zero(),
            framebuffer: Framebuffer::new(width, height),
        }
    }

    pub fn with_kind(kind: SolidKind, width: u32, height: u32) -> Self {
        Self::new(
            Scene::with_kind(kind, width, height),
            width as usize,
            height as usize,
        )
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Poll the source once, then render.
    ///
    /// The orientation only changes when the source hands over a new one;
    /// otherwise the previous value is drawn again. A source error is
    /// returned before anything is drawn.
    pub fn step(&mut self, source: &mut dyn OrientationSource) -> Result<(), SourceError> {
        if let Some(orientation) = source.poll()? {
            self.orientation = orientation;
        }
        render_frame(&self.scene, &self.orientation, &mut self.framebuffer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rgb;
    use std::collections::VecDeque;

    /// Hands out a fixed script of poll results
    struct Scripted {
        polls: VecDeque<Result<Option<Orientation>, SourceError>>,
    }

    impl OrientationSource for Scripted {
        fn poll(&mut self) -> Result<Option<Orientation>, SourceError> {
            self.polls.pop_front().unwrap_or(Ok(None))
        }

        fn label(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn test_starts_neutral() {
        let state = FrameState::with_kind(SolidKind::Cube, 800, 600);
        assert_eq!(state.orientation(), Orientation::zero());
        assert_eq!(state.framebuffer().width(), 800);
    }

    #[test]
    fn test_holds_orientation_between_samples() {
        let tilt = Orientation::new(0.0, std::f32::consts::PI, 0.0);
        let mut source = Scripted {
            polls: VecDeque::from(vec![Ok(Some(tilt)), Ok(None), Ok(None)]),
        };
        let mut state = FrameState::with_kind(SolidKind::Cube, 800, 600);

        for _ in 0..3 {
            state.step(&mut source).unwrap();
            assert_eq!(state.orientation(), tilt);
            // Half turn puts the green face nearest
            assert_eq!(state.framebuffer().get(400, 300), Some(Rgb::GREEN));
        }
    }

    #[test]
    fn test_source_error_keeps_state() {
        let mut source = Scripted {
            polls: VecDeque::from(vec![
                Ok(Some(Orientation::new(0.1, 0.2, 0.3))),
                Err(SourceError::Disconnected("unplugged".to_string())),
            ]),
        };
        let mut state = FrameState::with_kind(SolidKind::Prism, 800, 600);

        state.step(&mut source).unwrap();
        let err = state.step(&mut source).unwrap_err();
        assert!(matches!(err, SourceError::Disconnected(_)));
        assert_eq!(state.orientation(), Orientation::new(0.1, 0.2, 0.3));
    }
}
