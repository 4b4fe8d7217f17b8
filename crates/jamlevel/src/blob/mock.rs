//! Synthetic blob builder for tests.
//!
//! Lays out a level blob the way the game serializes it: header at `0x1C`,
//! doors from `0x84` (or right after the header), then the frame element
//! and game block arrays at fixed offsets. Frames sit in front of the
//! blocks so the block array is never mistaken for a frame array.

use super::layout::{WORD, block, door, frame, header};

pub const DEFAULT_GUID: &str = "0b6f3c3e-2a54-4d6c-9a51-8e9b8f1f0c11";
pub const DEFAULT_FRAME_ARRAY: usize = 0x180;
pub const DEFAULT_BLOCK_ARRAY: usize = 0x300;
const BLOB_SIZE: usize = 0xA00;

#[derive(Debug, Clone, Copy, Default)]
pub struct MockBlock {
    pub x: f32,
    pub y: f32,
    pub rot_z: f32,
    pub group: i32,
    pub color: i32,
    pub flag_a: i32,
    pub flag_b: i32,
    pub inner: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MockDoor {
    pub x: f32,
    pub y: f32,
    pub rot_x: f32,
    pub rot_z: f32,
    pub parts: i32,
    pub color: i32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MockFrame {
    pub x: f32,
    pub y: f32,
    pub rot_x: f32,
    pub group: i32,
    pub color: i32,
}

#[derive(Debug, Clone)]
pub struct MockBlobBuilder {
    name: String,
    guid: String,
    width: i32,
    height: i32,
    hidden: Vec<(i32, i32)>,
    grid_colors: usize,
    doors: Vec<MockDoor>,
    door_offset: Option<usize>,
    blocks: Vec<MockBlock>,
    block_offset: usize,
    frames: Vec<MockFrame>,
    frame_offset: usize,
}

impl MockBlobBuilder {
    pub fn new(name: &str, width: i32, height: i32) -> Self {
        Self {
            name: name.to_string(),
            guid: DEFAULT_GUID.to_string(),
            width,
            height,
            hidden: Vec::new(),
            grid_colors: 0,
            doors: Vec::new(),
            door_offset: None,
            blocks: Vec::new(),
            block_offset: DEFAULT_BLOCK_ARRAY,
            frames: Vec::new(),
            frame_offset: DEFAULT_FRAME_ARRAY,
        }
    }

    pub fn guid(mut self, guid: &str) -> Self {
        self.guid = guid.to_string();
        self
    }

    pub fn hidden(mut self, cells: &[(i32, i32)]) -> Self {
        self.hidden.extend_from_slice(cells);
        self
    }

    pub fn grid_colors(mut self, count: usize) -> Self {
        self.grid_colors = count;
        self
    }

    pub fn door(mut self, door: MockDoor) -> Self {
        self.doors.push(door);
        self
    }

    pub fn door_offset(mut self, offset: usize) -> Self {
        self.door_offset = Some(offset);
        self
    }

    pub fn block(mut self, block: MockBlock) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn block_offset(mut self, offset: usize) -> Self {
        self.block_offset = offset;
        self
    }

    pub fn frame(mut self, frame: MockFrame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Byte offset where the header ends (start of the camera block + its size)
    fn write_header(&self, buf: &mut [u8]) -> usize {
        let mut offset = header::NAME;
        offset = put_string(buf, offset, &self.name);
        offset = put_string(buf, offset, &self.guid);
        put_i32(buf, offset, self.width);
        put_i32(buf, offset + WORD, self.height);
        offset += WORD * 2;

        put_i32(buf, offset, self.hidden.len() as i32);
        offset += WORD;
        for &(x, y) in &self.hidden {
            put_i32(buf, offset, x);
            put_i32(buf, offset + WORD, y);
            offset += header::COORD_ENTRY;
        }

        put_i32(buf, offset, self.grid_colors as i32);
        offset += WORD + self.grid_colors * header::COORD_ENTRY;

        // Camera looking down the Z axis
        put_f32(buf, offset + WORD * 2, -1.0);
        put_f32(buf, offset + header::CAMERA_FOV, 60.0);
        offset + header::CAMERA_SIZE
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = vec![0u8; BLOB_SIZE];
        let header_end = self.write_header(&mut buf);

        // Long headers run over the declared-count slot
        if header_end <= header::DOOR_COUNT {
            put_i32(&mut buf, header::DOOR_COUNT, self.doors.len() as i32);
        }
        let mut offset = self
            .door_offset
            .unwrap_or_else(|| (header::DOOR_COUNT + WORD).max(header_end + WORD));
        for d in &self.doors {
            put_f32(&mut buf, offset + door::POSITION, d.x);
            put_f32(&mut buf, offset + door::POSITION + WORD, d.y);
            put_f32(&mut buf, offset + door::ROTATION, d.rot_x);
            put_f32(&mut buf, offset + door::ROTATION + WORD * 2, d.rot_z);
            put_i32(&mut buf, offset + door::PART_COUNT, d.parts);
            put_i32(&mut buf, offset + door::COLOR_TYPE, d.color);
            offset += door::STRIDE;
        }

        if !self.blocks.is_empty() {
            put_i32(&mut buf, self.block_offset, self.blocks.len() as i32);
            let mut offset = self.block_offset + WORD;
            for b in &self.blocks {
                put_f32(&mut buf, offset + block::POSITION, b.x);
                put_f32(&mut buf, offset + block::POSITION + WORD, b.y);
                put_f32(&mut buf, offset + block::ROTATION + WORD * 2, b.rot_z);
                put_i32(&mut buf, offset + block::GROUP_TYPE, b.group);
                put_i32(&mut buf, offset + block::COLOR_TYPE, b.color);
                put_i32(&mut buf, offset + block::MOVE_FLAG_A, b.flag_a);
                put_i32(&mut buf, offset + block::MOVE_FLAG_B, b.flag_b);
                if let Some(inner) = b.inner {
                    put_i32(&mut buf, offset + block::INNER_FLAG, 1);
                    put_i32(&mut buf, offset + block::INNER_COLOR, inner);
                }
                offset += block::STRIDE;
            }
        }

        if !self.frames.is_empty() {
            put_i32(&mut buf, self.frame_offset, self.frames.len() as i32);
            let mut offset = self.frame_offset + WORD;
            for f in &self.frames {
                put_f32(&mut buf, offset + frame::POSITION, f.x);
                put_f32(&mut buf, offset + frame::POSITION + WORD, f.y);
                put_f32(&mut buf, offset + frame::ROTATION, f.rot_x);
                for axis in 0..3 {
                    put_f32(&mut buf, offset + frame::SCALE + WORD * axis, 1.0);
                }
                put_i32(&mut buf, offset + frame::GROUP_TYPE, f.group);
                put_i32(&mut buf, offset + frame::COLOR_TYPE, f.color);
                offset += frame::STRIDE;
            }
        }

        buf
    }
}

pub fn put_i32(buf: &mut [u8], offset: usize, value: i32) {
    buf[offset..offset + WORD].copy_from_slice(&value.to_le_bytes());
}

pub fn put_f32(buf: &mut [u8], offset: usize, value: f32) {
    buf[offset..offset + WORD].copy_from_slice(&value.to_le_bytes());
}

fn put_string(buf: &mut [u8], offset: usize, s: &str) -> usize {
    put_i32(buf, offset, s.len() as i32);
    let start = offset + WORD;
    buf[start..start + s.len()].copy_from_slice(s.as_bytes());
    super::align4(start + s.len())
}
