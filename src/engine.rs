use crate::browser;
use anyhow::{anyhow, Result};
// ELI5: web assembly is a single threaded environment, so Rc RefCell > Mutex
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::CanvasRenderingContext2d;

use self::input::InputEvent;

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    /// One host frame: apply queued input, then advance anything in flight
    /// - `now` is the requestAnimationFrame timestamp (ms)
    fn update(&mut self, now: f64, events: &[InputEvent], renderer: &dyn Draw);
    fn draw(&self, renderer: &dyn Draw);
}

// ==================== Geometry ====================
#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// `self` shifted back by `offset` (client space -> surface space)
    pub fn relative_to(&self, offset: Point) -> Point {
        Point::new(self.x - offset.x, self.y - offset.y)
    }

    /// Unit vector pointing from `self` towards `to`, None when they coincide
    pub fn direction_to(&self, to: Point) -> Option<Point> {
        let length = self.distance_to(to);
        if length > 0.0 {
            Some(Point::new((to.x - self.x) / length, (to.y - self.y) / length))
        } else {
            None
        }
    }

    /// Moves `distance` along `direction`
    pub fn advance(&self, direction: Point, distance: f64) -> Point {
        Point::new(
            self.x + direction.x * distance,
            self.y + direction.y * distance,
        )
    }

    /// Same formula on both axes as `origin.x - (origin.x - to.x) * t`
    pub fn lerp(&self, to: Point, t: f64) -> Point {
        Point::new(self.x - (self.x - to.x) * t, self.y - (self.y - to.y) * t)
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }
}

// ==================== Rendering ====================
/// Draw calls the game issues. The canvas `Renderer` is the real one, tests
/// swap in a recorder.
pub trait Draw {
    fn clear(&self, rect: &Rect);
    fn fill_circle(&self, center: Point, radius: f64, color: &str);
    fn stroke_circle(&self, center: Point, radius: f64, color: &str, line_width: f64);
    fn fill_polygon(&self, points: &[Point], color: &str);
    fn stroke_polygon(&self, points: &[Point], color: &str, line_width: f64);
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Renderer { context }
    }

    fn circle_path(&self, center: Point, radius: f64) {
        self.context.begin_path();
        if let Err(err) = self
            .context
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
        {
            error!("Renderer: arc at {:?} failed : {:#?}", center, err);
        }
    }

    fn polygon_path(&self, points: &[Point]) {
        self.context.begin_path();
        if let Some((first, rest)) = points.split_first() {
            self.context.move_to(first.x, first.y);
            for point in rest {
                self.context.line_to(point.x, point.y);
            }
            self.context.close_path();
        }
    }
}

impl Draw for Renderer {
    fn clear(&self, rect: &Rect) {
        self.context.clear_rect(
            rect.position.x,
            rect.position.y,
            rect.size.width,
            rect.size.height,
        );
    }

    fn fill_circle(&self, center: Point, radius: f64, color: &str) {
        self.circle_path(center, radius);
        self.context.set_fill_style_str(color);
        self.context.fill();
    }

    fn stroke_circle(&self, center: Point, radius: f64, color: &str, line_width: f64) {
        self.circle_path(center, radius);
        self.context.set_stroke_style_str(color);
        self.context.set_line_width(line_width);
        self.context.stroke();
    }

    fn fill_polygon(&self, points: &[Point], color: &str) {
        self.polygon_path(points);
        self.context.set_fill_style_str(color);
        self.context.fill();
    }

    fn stroke_polygon(&self, points: &[Point], color: &str, line_width: f64) {
        self.polygon_path(points);
        self.context.set_stroke_style_str(color);
        self.context.set_line_width(line_width);
        self.context.stroke();
    }
}

// ==================== Loop ====================
pub struct GameLoop {
    last_frame: f64,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut game = game.initialize().await?;
        let mut events = input::prepare_input(&browser::canvas()?, &browser::reset_button()?)?;
        let mut game_loop = GameLoop {
            last_frame: browser::now()?,
        };
        let renderer = Renderer::new(browser::context()?);
        game.draw(&renderer);

        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            let pending = input::drain(&mut events);
            // never hand the game a timestamp older than the last one
            game_loop.last_frame = perf.max(game_loop.last_frame);
            game.update(game_loop.last_frame, &pending, &renderer);
            if let Some(callback) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(callback) {
                    error!("GameLoop: {:#}", err);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }
}

// ==================== Input ====================
pub mod input {
    use super::Point;
    use crate::browser;
    use anyhow::{anyhow, Result};
    use futures::channel::mpsc::{unbounded, UnboundedReceiver};
    use wasm_bindgen::JsCast;
    use web_sys::{Element, HtmlCanvasElement, MouseEvent};

    #[derive(Debug, Copy, Clone, PartialEq)]
    pub enum InputEvent {
        /// `raw` is in client coordinates, `surface_offset` is where the
        /// canvas sat on screen when the click landed
        Click { raw: Point, surface_offset: Point },
        Reset,
    }

    /// DOM listeners push into an unbounded channel, the game loop drains it
    /// once per frame
    pub fn prepare_input(
        canvas: &HtmlCanvasElement,
        reset_button: &Element,
    ) -> Result<UnboundedReceiver<InputEvent>> {
        let (click_tx, rx) = unbounded();
        let reset_tx = click_tx.clone();
        let surface = canvas.clone();

        let onclick = browser::closure_wrap(Box::new(move |event: MouseEvent| {
            let (left, top) = browser::surface_offset(&surface);
            let _ = click_tx.unbounded_send(InputEvent::Click {
                raw: Point::new(event.client_x() as f64, event.client_y() as f64),
                surface_offset: Point::new(left, top),
            });
        }) as Box<dyn FnMut(MouseEvent)>);

        let onreset = browser::closure_wrap(Box::new(move |_event: MouseEvent| {
            let _ = reset_tx.unbounded_send(InputEvent::Reset);
        }) as Box<dyn FnMut(MouseEvent)>);

        canvas
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())
            .map_err(|err| anyhow!("Could not listen for canvas clicks : {:#?}", err))?;
        reset_button
            .add_event_listener_with_callback("click", onreset.as_ref().unchecked_ref())
            .map_err(|err| anyhow!("Could not listen for reset clicks : {:#?}", err))?;

        // listeners live as long as the page
        onclick.forget();
        onreset.forget();

        Ok(rx)
    }

    pub fn drain(receiver: &mut UnboundedReceiver<InputEvent>) -> Vec<InputEvent> {
        let mut events = Vec::new();
        loop {
            match receiver.try_next() {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {
                    error!("Input channel closed");
                    break;
                }
                // nothing queued this frame
                Err(_) => break,
            }
        }
        events
    }
}
