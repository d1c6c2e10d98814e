use crate::{core::Unit, eval::EvaluatedPage};

/// 128-bit content fingerprint of an evaluated frame. Two frames with the
/// same fingerprint carry identical style output, so the runtime can skip
/// re-emitting them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    pub hi: u64,
    pub lo: u64,
}

pub fn fingerprint_frame(frame: &EvaluatedPage) -> FrameFingerprint {
    let mut a = Fnv1a64::new(0xcbf29ce484222325);
    let mut b = Fnv1a64::new(0x9ae16a3b2f90404f);

    write_u64_pair(&mut a, &mut b, frame.sections.len() as u64);
    for section in &frame.sections {
        write_str_pair(&mut a, &mut b, &section.name);
        write_f64_pair(&mut a, &mut b, section.progress);
        write_u8_pair(&mut a, &mut b, u8::from(section.pinned));

        write_u64_pair(&mut a, &mut b, section.nodes.len() as u64);
        for node in &section.nodes {
            write_str_pair(&mut a, &mut b, &node.actor_id);
            write_i64_pair(&mut a, &mut b, i64::from(node.z));
            write_f64_pair(&mut a, &mut b, node.opacity);
            write_f64_pair(&mut a, &mut b, node.translate_x);
            write_f64_pair(&mut a, &mut b, node.translate_y);
            write_u8_pair(&mut a, &mut b, unit_tag(node.translate_x_unit));
            write_u8_pair(&mut a, &mut b, unit_tag(node.translate_y_unit));
            write_f64_pair(&mut a, &mut b, node.scale);
            write_f64_pair(&mut a, &mut b, node.rotate_deg);

            match node.tint {
                Some(c) => {
                    write_u8_pair(&mut a, &mut b, 1);
                    for ch in [c.r, c.g, c.b, c.a] {
                        write_u8_pair(&mut a, &mut b, ch);
                    }
                }
                None => write_u8_pair(&mut a, &mut b, 0),
            }

            match &node.chars {
                Some(chars) => {
                    write_u8_pair(&mut a, &mut b, 1);
                    write_u64_pair(&mut a, &mut b, chars.len() as u64);
                    for &c in chars {
                        write_f64_pair(&mut a, &mut b, c);
                    }
                }
                None => write_u8_pair(&mut a, &mut b, 0),
            }

            match &node.draw {
                Some(d) => {
                    write_u8_pair(&mut a, &mut b, 1);
                    write_f64_pair(&mut a, &mut b, d.fraction);
                    write_f64_pair(&mut a, &mut b, d.total_len);
                    write_f64_pair(&mut a, &mut b, d.dash_offset);
                }
                None => write_u8_pair(&mut a, &mut b, 0),
            }

            match node.reveal_t {
                Some(t) => {
                    write_u8_pair(&mut a, &mut b, 1);
                    write_f64_pair(&mut a, &mut b, t);
                }
                None => write_u8_pair(&mut a, &mut b, 0),
            }
        }
    }

    FrameFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn unit_tag(u: Unit) -> u8 {
    match u {
        Unit::Px => 0,
        Unit::Vw => 1,
        Unit::Vh => 2,
        Unit::Percent => 3,
    }
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_i64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: i64) {
    write_u64_pair(a, b, v as u64);
}

fn write_f64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: f64) {
    write_u64_pair(a, b, v.to_bits());
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    write_u64_pair(a, b, s.len() as u64);
    a.write_bytes(s.as_bytes());
    b.write_bytes(s.as_bytes());
}

#[derive(Clone, Copy)]
struct Fnv1a64(u64);

impl Fnv1a64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.0 = h;
    }

    fn finish(self) -> u64 {
        self.0
    }
}
