// The handful of 2D drawing calls the particle field needs. Implemented for the browser's
// canvas context, and for an in-memory recorder in tests.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_fill_style(&mut self, css: &str);
    // A blur of zero turns the shadow off
    fn set_shadow(&mut self, blur: f64, css: &str);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), JsValue>;
    fn fill(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64) -> Result<(), JsValue>;
    fn rotate(&mut self, radians: f64) -> Result<(), JsValue>;
}

impl Surface for CanvasRenderingContext2d {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
    }

    #[allow(deprecated)]
    fn set_fill_style(&mut self, css: &str) {
        CanvasRenderingContext2d::set_fill_style(self, &JsValue::from_str(css));
    }

    fn set_shadow(&mut self, blur: f64, css: &str) {
        self.set_shadow_blur(blur);
        self.set_shadow_color(css);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), JsValue> {
        self.arc(x, y, radius, 0.0, std::f64::consts::PI * 2.0)
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::translate(self, x, y)
    }

    fn rotate(&mut self, radians: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::rotate(self, radians)
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::Surface;
    use wasm_bindgen::JsValue;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Op {
        Clear(f64, f64, f64, f64),
        FillStyle(String),
        Shadow(f64, String),
        BeginPath,
        MoveTo(f64, f64),
        LineTo(f64, f64),
        ClosePath,
        Circle(f64, f64, f64),
        Fill,
        Save,
        Restore,
        Translate(f64, f64),
        Rotate(f64),
    }

    #[derive(Default)]
    pub struct RecordingSurface {
        pub ops: Vec<Op>,
    }

    impl RecordingSurface {
        pub fn circles(&self) -> Vec<(f64, f64, f64)> {
            self.ops
                .iter()
                .filter_map(|op| match *op {
                    Op::Circle(x, y, r) => Some((x, y, r)),
                    _ => None,
                })
                .collect()
        }

        pub fn count(&self, wanted: &Op) -> usize {
            self.ops.iter().filter(|op| *op == wanted).count()
        }
    }

    impl Surface for RecordingSurface {
        fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
            self.ops.push(Op::Clear(x, y, width, height));
        }

        fn set_fill_style(&mut self, css: &str) {
            self.ops.push(Op::FillStyle(css.to_owned()));
        }

        fn set_shadow(&mut self, blur: f64, css: &str) {
            self.ops.push(Op::Shadow(blur, css.to_owned()));
        }

        fn begin_path(&mut self) {
            self.ops.push(Op::BeginPath);
        }

        fn move_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::MoveTo(x, y));
        }

        fn line_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::LineTo(x, y));
        }

        fn close_path(&mut self) {
            self.ops.push(Op::ClosePath);
        }

        fn circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), JsValue> {
            self.ops.push(Op::Circle(x, y, radius));
            Ok(())
        }

        fn fill(&mut self) {
            self.ops.push(Op::Fill);
        }

        fn save(&mut self) {
            self.ops.push(Op::Save);
        }

        fn restore(&mut self) {
            self.ops.push(Op::Restore);
        }

        fn translate(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
            self.ops.push(Op::Translate(x, y));
            Ok(())
        }

        fn rotate(&mut self, radians: f64) -> Result<(), JsValue> {
            self.ops.push(Op::Rotate(radians));
            Ok(())
        }
    }
}
