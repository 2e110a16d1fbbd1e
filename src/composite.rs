//! Compositing and blend modes
//!
//! Colors are straight alpha.  A source `(Cs, as)` over a destination
//! `(Cb, ab)` is first mixed with the blend mode `B`,
//!
//! ```text
//! Cs' = (1 - ab) Cs + ab B(Cb, Cs)
//! ```
//!
//! and then combined with the Porter-Duff factors `Fa`, `Fb` of the
//! compositing mode,
//!
//! ```text
//! ao = as Fa + ab Fb
//! co = as Fa Cs' + ab Fb Cb
//! ```
//!
//! with the result color `co / ao`.

/// Porter-Duff compositing operator
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum CompositingMode {
    Clear,
    Copy,
    SourceOver,
    SourceIn,
    SourceOut,
    SourceAtop,
    DestinationOver,
    DestinationIn,
    DestinationOut,
    DestinationAtop,
    Xor,
    Lighter,
}
impl Default for CompositingMode {
    fn default() -> CompositingMode {
        CompositingMode::SourceOver
    }
}

impl CompositingMode {
    /// Source and destination factors for alphas `as_` and `ab`
    pub fn factors(self, as_: f64, ab: f64) -> (f64, f64) {
        use CompositingMode::*;
        match self {
            Clear           => (0.0, 0.0),
            Copy            => (1.0, 0.0),
            SourceOver      => (1.0, 1.0 - as_),
            SourceIn        => (ab, 0.0),
            SourceOut       => (1.0 - ab, 0.0),
            SourceAtop      => (ab, 1.0 - as_),
            DestinationOver => (1.0 - ab, 1.0),
            DestinationIn   => (0.0, as_),
            DestinationOut  => (0.0, 1.0 - as_),
            DestinationAtop => (1.0 - ab, as_),
            Xor             => (1.0 - ab, 1.0 - as_),
            Lighter         => (1.0, 1.0),
        }
    }
}

/// Separable blend mode
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum BlendMode {
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
}
impl Default for BlendMode {
    fn default() -> BlendMode {
        BlendMode::Normal
    }
}

impl BlendMode {
    /// Mix backdrop `cb` with source `cs`, both in [0,1]
    pub fn apply(self, cb: f64, cs: f64) -> f64 {
        use BlendMode::*;
        match self {
            Normal     => cs,
            Multiply   => cb * cs,
            Screen     => screen(cb, cs),
            Overlay    => hard_light(cs, cb),
            Darken     => cb.min(cs),
            Lighten    => cb.max(cs),
            ColorDodge => {
                if cb == 0.0 {
                    0.0
                } else if cs >= 1.0 {
                    1.0
                } else {
                    (cb / (1.0 - cs)).min(1.0)
                }
            },
            ColorBurn  => {
                if cb >= 1.0 {
                    1.0
                } else if cs <= 0.0 {
                    0.0
                } else {
                    1.0 - ((1.0 - cb) / cs).min(1.0)
                }
            },
            HardLight  => hard_light(cb, cs),
            SoftLight  => {
                if cs <= 0.5 {
                    cb - (1.0 - 2.0 * cs) * cb * (1.0 - cb)
                } else {
                    let d = if cb <= 0.25 {
                        ((16.0 * cb - 12.0) * cb + 4.0) * cb
                    } else {
                        cb.sqrt()
                    };
                    cb + (2.0 * cs - 1.0) * (d - cb)
                }
            },
            Difference => (cb - cs).abs(),
            Exclusion  => cb + cs - 2.0 * cb * cs,
        }
    }
}

fn screen(cb: f64, cs: f64) -> f64 {
    cb + cs - cb * cs
}

fn hard_light(cb: f64, cs: f64) -> f64 {
    if cs <= 0.5 {
        cb * 2.0 * cs
    } else {
        screen(cb, 2.0 * cs - 1.0)
    }
}

/// Composite straight alpha source `src` onto `dst`, components in [0,1]
///
///     use raster2d::{composite, CompositingMode, BlendMode};
///
///     let dst = [0.0, 0.0, 1.0, 1.0];
///     let src = [1.0, 0.0, 0.0, 0.5];
///     let out = composite(dst, src, CompositingMode::SourceOver, BlendMode::Normal);
///     assert_eq!(out[3], 1.0);
///     assert!((out[0] - 0.5).abs() < 1e-12);
///     assert!((out[2] - 0.5).abs() < 1e-12);
///
pub fn composite(dst: [f64; 4], src: [f64; 4], comp: CompositingMode, mode: BlendMode) -> [f64; 4] {
    let (as_, ab) = (src[3], dst[3]);
    let (fa, fb) = comp.factors(as_, ab);
    let ao = as_ * fa + ab * fb;
    let lighter = comp == CompositingMode::Lighter;
    let ao_c = if lighter { ao.min(1.0) } else { ao };
    if ao_c <= 0.0 {
        return [0.0; 4];
    }
    let mut out = [0.0, 0.0, 0.0, ao_c];
    for i in 0 .. 3 {
        let (cs, cb) = (src[i], dst[i]);
        let mixed = (1.0 - ab) * cs + ab * mode.apply(cb, cs);
        let mut co = as_ * fa * mixed + ab * fb * cb;
        if lighter {
            co = co.min(1.0);
        }
        out[i] = (co / ao_c).max(0.0).min(1.0);
    }
    out
}
