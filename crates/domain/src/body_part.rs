//! 身体部位参考表。静态数据，不落库、与用户无关。

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BodyPart {
    pub name: &'static str,
    pub code: i32,
}

pub const BODY_PARTS: &[BodyPart] = &[
    BodyPart { name: "Head", code: 1 },
    BodyPart { name: "Neck", code: 2 },
    BodyPart { name: "Chest", code: 3 },
    BodyPart { name: "Back", code: 4 },
    BodyPart { name: "Abdomen", code: 5 },
    BodyPart { name: "Left arm", code: 6 },
    BodyPart { name: "Right arm", code: 7 },
    BodyPart { name: "Left leg", code: 8 },
    BodyPart { name: "Right leg", code: 9 },
];
