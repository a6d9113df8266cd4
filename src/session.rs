//! The drawing studio: a sketch surface and a coloring surface, driven by input events.
//!
//! Input is routed through a small state machine:
//!
//! ```text
//!             press (sketch)                      press (coloring)
//!   Idle ----------------------> StrokeInProgress   Idle -----------------> FillInProgress
//!    ^                               |               ^                            |
//!    +------- release / resize ------+               +------ update / resize -----+
//! ```
//!
//! A tap on the coloring surface queues a fill, which is applied on the next call
//! to [`Session::update`]. Taps that arrive while a fill is queued are rejected.
use crate::error::Error;
use crate::gfx::pixels::{self, PixelBuffer};
use crate::gfx::prelude::*;
use crate::input::{self, Bounds, InputEvent};
use crate::palette::Palette;
use crate::png::EncodedImage;
use crate::settings::Settings;
use crate::{coloring::ColoringSurface, sketch::SketchSurface};

/// Surface an input event is directed at.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Target {
    Sketch,
    Coloring,
}

/// Session input state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum State {
    Idle,
    /// A stroke is being drawn on the sketch surface.
    StrokeInProgress,
    /// A fill was requested on the coloring surface and hasn't been applied yet.
    FillInProgress { client: Point, color: Rgba8 },
}

#[derive(Debug)]
pub struct Session {
    pub sketch: SketchSurface,
    pub coloring: ColoringSurface,
    pub palette: Palette,

    sketch_bounds: Bounds,
    coloring_bounds: Bounds,
    state: State,
}

impl Session {
    /// Create a session with both surfaces at the configured size, displayed 1:1
    /// at the viewport origin.
    pub fn new(settings: &Settings) -> Result<Self, Error> {
        let size = settings.surface_size();

        if !pixels::is_supported(size) {
            return Err(Error::InvalidSize(size));
        }
        let bounds = Bounds::new(Rect::origin(Size::<f32>::from(size)), size);
        let mut coloring = ColoringSurface::with_history(size, settings.history_limit);

        coloring.tolerance = settings.tolerance;

        Ok(Self {
            sketch: SketchSurface::new(size, settings.brush()?),
            coloring,
            palette: Palette::default(),
            sketch_bounds: bounds,
            coloring_bounds: bounds,
            state: State::Idle,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn bounds(&self, target: Target) -> &Bounds {
        match target {
            Target::Sketch => &self.sketch_bounds,
            Target::Coloring => &self.coloring_bounds,
        }
    }

    ///////////////////////////////////////////////////////////////////////////
    // Event handlers
    ///////////////////////////////////////////////////////////////////////////

    pub fn handle_input(&mut self, target: Target, event: &InputEvent) -> Result<(), Error> {
        match target {
            Target::Sketch => {
                self.handle_sketch_input(event);
                Ok(())
            }
            Target::Coloring => self.handle_coloring_input(event),
        }
    }

    fn handle_sketch_input(&mut self, event: &InputEvent) {
        if let State::FillInProgress { .. } = self.state {
            debug!("session: ignoring sketch input while a fill is in progress");
            return;
        }

        if event.is_release() {
            if self.state == State::StrokeInProgress {
                self.sketch.end_stroke();
                self.state = State::Idle;
            }
            return;
        }
        let p = match input::to_buffer_coords(&self.sketch_bounds, event) {
            Some(p) => p,
            None => return,
        };

        if event.is_press() {
            self.sketch.begin_stroke(p);
            self.state = State::StrokeInProgress;
        } else if event.is_move() && self.state == State::StrokeInProgress {
            self.sketch.extend_stroke(p);
        }
    }

    fn handle_coloring_input(&mut self, event: &InputEvent) -> Result<(), Error> {
        if !event.is_press() {
            return Ok(());
        }
        let client = match event.position() {
            Some(p) => p,
            None => return Ok(()),
        };

        match self.state {
            State::Idle => {
                if !self.coloring.is_loaded() {
                    return Err(Error::NoImageLoaded);
                }
                self.state = State::FillInProgress {
                    client,
                    color: self.palette.selected,
                };
                Ok(())
            }
            State::FillInProgress { .. } => {
                warn!("session: fill at {} rejected, another fill is in progress", client);
                Err(Error::Busy)
            }
            State::StrokeInProgress => {
                debug!("session: ignoring coloring input while drawing");
                Ok(())
            }
        }
    }

    /// Apply the queued fill, if any, and return to idle. Returns the number of
    /// pixels written by the fill.
    pub fn update(&mut self) -> Result<Option<usize>, Error> {
        let (client, color) = match self.state {
            State::FillInProgress { client, color } => (client, color),
            _ => return Ok(None),
        };
        let result = self
            .coloring
            .handle_tap(&self.coloring_bounds, client, &color.hex());

        self.state = State::Idle;

        result.map(Some)
    }

    /// Tap the coloring surface and apply the resulting fill right away.
    pub fn tap(&mut self, client: Point) -> Result<usize, Error> {
        self.handle_coloring_input(&InputEvent::PointerDown(client))?;
        self.update().map(|n| n.unwrap_or(0))
    }

    /// Move or resize one of the surfaces. The surface's buffer is reallocated at
    /// the new backing size, cancelling a stroke or pending fill on that surface.
    /// Unsupported sizes are rejected and leave the session untouched.
    pub fn resize(&mut self, target: Target, bounds: Bounds) -> Result<(), Error> {
        match target {
            Target::Sketch => {
                self.sketch.resize(bounds.backing)?;
                self.sketch_bounds = bounds;

                if self.state == State::StrokeInProgress {
                    debug!("session: stroke cancelled by resize");
                    self.state = State::Idle;
                }
            }
            Target::Coloring => {
                self.coloring.resize(bounds.backing)?;
                self.coloring_bounds = bounds;

                if let State::FillInProgress { .. } = self.state {
                    debug!("session: fill cancelled by resize");
                    self.state = State::Idle;
                }
            }
        }
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Select the fill color, by palette name or hex code.
    pub fn select_color(&mut self, input: &str) -> Result<Rgba8, Error> {
        let color = self.palette.select(input)?;
        info!("session: selected color {}", color.hex());

        Ok(color)
    }

    /// Export the sketch for line-art generation.
    pub fn submit_sketch(&self) -> Result<EncodedImage, Error> {
        self.sketch.export_as_image()
    }

    /// Load generated line art onto the coloring surface.
    pub fn load_line_art(&mut self, image: &PixelBuffer) {
        if let State::FillInProgress { .. } = self.state {
            self.state = State::Idle;
        }
        self.coloring.load_image(image);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn session() -> Session {
        let settings = Settings {
            surface_width: 8,
            surface_height: 8,
            stroke_width: 1,
            ..Settings::default()
        };
        Session::new(&settings).unwrap()
    }

    /// A white image with a black vertical line at x = 3.
    fn line_art() -> PixelBuffer {
        let mut art = PixelBuffer::new([8, 8]);
        for y in 0..8 {
            for x in 0..8 {
                art.set(x, y, if x == 3 { Rgba8::BLACK } else { Rgba8::WHITE });
            }
        }
        art
    }

    #[test]
    fn test_stroke() {
        let mut s = session();

        s.handle_input(Target::Sketch, &InputEvent::PointerMove(Point::new(1., 1.)))
            .unwrap();
        assert!(s.sketch.is_empty());
        assert_eq!(s.state(), State::Idle);

        s.handle_input(Target::Sketch, &InputEvent::PointerDown(Point::new(1., 1.)))
            .unwrap();
        assert_eq!(s.state(), State::StrokeInProgress);

        s.handle_input(Target::Sketch, &InputEvent::PointerMove(Point::new(5., 1.)))
            .unwrap();
        s.handle_input(Target::Sketch, &InputEvent::PointerUp).unwrap();

        assert_eq!(s.state(), State::Idle);
        assert!(!s.sketch.is_drawing());
        assert_eq!(s.sketch.pixels().get(3, 1), Some(Rgba8::BLACK));
        assert!(s.submit_sketch().is_ok());
    }

    #[test]
    fn test_touch_stroke() {
        let mut s = session();

        s.handle_input(Target::Sketch, &InputEvent::TouchStart(vec![Point::new(0., 6.)]))
            .unwrap();
        s.handle_input(Target::Sketch, &InputEvent::TouchMove(vec![]))
            .unwrap();
        s.handle_input(
            Target::Sketch,
            &InputEvent::TouchMove(vec![Point::new(0., 7.), Point::new(7., 0.)]),
        )
        .unwrap();
        s.handle_input(Target::Sketch, &InputEvent::TouchEnd).unwrap();

        assert_eq!(s.sketch.pixels().get(0, 7), Some(Rgba8::BLACK));
        assert_eq!(s.sketch.pixels().get(7, 0), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn test_empty_submit() {
        let s = session();
        assert!(matches!(s.submit_sketch(), Err(Error::EmptyCanvas)));
    }

    #[test]
    fn test_fill() {
        let mut s = session();
        let tap = InputEvent::PointerDown(Point::new(1., 1.));

        assert!(matches!(
            s.handle_input(Target::Coloring, &tap),
            Err(Error::NoImageLoaded)
        ));
        assert_eq!(s.state(), State::Idle);

        s.load_line_art(&line_art());
        s.select_color("blue").unwrap();
        s.handle_input(Target::Coloring, &tap).unwrap();

        assert!(matches!(s.state(), State::FillInProgress { .. }));
        assert!(matches!(
            s.handle_input(Target::Coloring, &InputEvent::PointerDown(Point::new(6., 1.))),
            Err(Error::Busy)
        ));
        assert_eq!(s.update().unwrap(), Some(24));
        assert_eq!(s.state(), State::Idle);
        assert_eq!(s.update().unwrap(), None);

        assert_eq!(s.coloring.pixels().get(0, 0), Some(Rgba8::new(0, 0, 0xff, 0xff)));
        assert_eq!(s.coloring.pixels().get(6, 1), Some(Rgba8::WHITE));

        // The rejected tap had no effect, so tapping again works.
        assert_eq!(s.tap(Point::new(6., 1.)).unwrap(), 32);
        assert!(s.coloring.undo());
        assert_eq!(s.coloring.pixels().get(6, 1), Some(Rgba8::WHITE));
    }

    #[test]
    fn test_select_invalid() {
        let mut s = session();

        assert!(matches!(s.select_color("#12"), Err(Error::InvalidColor(_))));
        assert_eq!(s.palette.selected, Palette::default().selected);
    }

    #[test]
    fn test_resize_cancels() {
        let mut s = session();

        s.handle_input(Target::Sketch, &InputEvent::PointerDown(Point::new(1., 1.)))
            .unwrap();
        s.handle_input(Target::Sketch, &InputEvent::PointerMove(Point::new(2., 1.)))
            .unwrap();
        s.resize(Target::Sketch, Bounds::new(Rect::new([0., 0.], [8., 8.]), [16, 16]))
            .unwrap();

        assert_eq!(s.state(), State::Idle);
        assert!(s.sketch.is_empty());
        assert_eq!(s.sketch.size(), Size::new(16, 16));

        // Movement after the resize doesn't resume the old stroke.
        s.handle_input(Target::Sketch, &InputEvent::PointerMove(Point::new(4., 4.)))
            .unwrap();
        assert!(s.sketch.is_empty());

        // Strokes are now scaled into the larger buffer.
        s.handle_input(Target::Sketch, &InputEvent::PointerDown(Point::new(4., 4.)))
            .unwrap();
        s.handle_input(Target::Sketch, &InputEvent::PointerMove(Point::new(5., 4.)))
            .unwrap();
        assert_eq!(s.sketch.pixels().get(10, 8), Some(Rgba8::BLACK));
    }

    #[test]
    fn test_resize_coloring() {
        let mut s = session();

        s.load_line_art(&line_art());
        s.handle_input(Target::Coloring, &InputEvent::PointerDown(Point::new(1., 1.)))
            .unwrap();
        s.resize(Target::Coloring, Bounds::unscaled(Rect::new([0., 0.], [4., 4.])))
            .unwrap();

        assert_eq!(s.state(), State::Idle);
        assert_eq!(s.update().unwrap(), None);
        assert!(matches!(s.tap(Point::new(1., 1.)), Err(Error::NoImageLoaded)));
    }

    #[test]
    fn test_resize_other_surface() {
        let mut s = session();
        let bounds = Bounds::unscaled(Rect::new([0., 0.], [8., 8.]));

        // Resizing the coloring surface doesn't interrupt a stroke.
        s.handle_input(Target::Sketch, &InputEvent::PointerDown(Point::new(1., 1.)))
            .unwrap();
        s.resize(Target::Coloring, bounds).unwrap();
        assert_eq!(s.state(), State::StrokeInProgress);

        s.handle_input(Target::Sketch, &InputEvent::PointerMove(Point::new(4., 1.)))
            .unwrap();
        s.handle_input(Target::Sketch, &InputEvent::PointerUp).unwrap();
        assert_eq!(s.sketch.pixels().get(4, 1), Some(Rgba8::BLACK));

        // Resizing the sketch surface doesn't drop a pending fill.
        s.load_line_art(&line_art());
        s.handle_input(Target::Coloring, &InputEvent::PointerDown(Point::new(1., 1.)))
            .unwrap();
        s.resize(Target::Sketch, bounds).unwrap();

        assert!(matches!(s.state(), State::FillInProgress { .. }));
        assert_eq!(s.update().unwrap(), Some(24));
    }

    #[test]
    fn test_resize_unsupported() {
        let mut s = session();
        let huge = Bounds::new(Rect::new([0., 0.], [8., 8.]), [65536, 65537]);

        s.handle_input(Target::Sketch, &InputEvent::PointerDown(Point::new(1., 1.)))
            .unwrap();

        assert!(matches!(s.resize(Target::Sketch, huge), Err(Error::InvalidSize(_))));
        assert!(matches!(s.resize(Target::Coloring, huge), Err(Error::InvalidSize(_))));
        assert_eq!(s.state(), State::StrokeInProgress);
        assert_eq!(s.bounds(Target::Sketch).backing, Size::new(8, 8));

        let settings = Settings {
            surface_width: 65536,
            surface_height: 65537,
            ..Settings::default()
        };
        assert!(matches!(Session::new(&settings), Err(Error::InvalidSize(_))));
    }
}
