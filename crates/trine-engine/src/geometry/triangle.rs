/// One triangle in clip space: bottom-left, bottom-right, top.
#[rustfmt::skip]
pub const TRIANGLE: [f32; 9] = [
    -1.0, -1.0, 0.0,
     1.0, -1.0, 0.0,
     0.0,  1.0, 0.0,
];
