use std::fs::File;
use std::io::Read;

const MAGIC: &[u8; 8] = b"farbfeld";
const HEADER: usize = 16;


/// Loads a farbfeld image and packs it into the _NET_WM_ICON layout:
/// width, height, then one ARGB word per pixel.
pub fn load(path: &str) -> Result<Vec<u64>, Box<dyn std::error::Error>> {
    let mut data: Vec<u8> = Vec::new();

    File::open(path)?.read_to_end(&mut data)?;

    decode(&data)
}

fn decode(data: &[u8]) -> Result<Vec<u64>, Box<dyn std::error::Error>> {
    if data.len() < HEADER || &data[..MAGIC.len()] != MAGIC {
        return Err("not a farbfeld image".into());
    }

    let width = u32::from_be_bytes(data[8..12].try_into()?) as usize;
    let height = u32::from_be_bytes(data[12..16].try_into()?) as usize;

    let pixels = width.checked_mul(height).ok_or("farbfeld dimensions overflow")?;
    let bytes = pixels.checked_mul(8).ok_or("farbfeld dimensions overflow")?;

    if data.len() < HEADER + bytes {
        return Err("truncated farbfeld image".into());
    }

    let mut icon: Vec<u64> = Vec::with_capacity(2 + pixels);

    icon.push(width as u64);
    icon.push(height as u64);

    // components are 16 bit big endian, the window manager wants 8 bit ARGB
    for pixel in data[HEADER..HEADER + bytes].chunks_exact(8) {
        let (r, g, b, a) = (pixel[0], pixel[2], pixel[4], pixel[6]);

        icon.push(((a as u64) << 24) | ((r as u64) << 16) | ((g as u64) << 8) | b as u64);
    }

    Ok(icon)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farbfeld(width: u32, height: u32, pixels: &[[u8; 4]]) -> Vec<u8> {
        let mut data = MAGIC.to_vec();

        data.extend(width.to_be_bytes());
        data.extend(height.to_be_bytes());

        for [r, g, b, a] in pixels {
            for component in [r, g, b, a] {
                data.extend([*component, 0]);
            }
        }

        data
    }

    #[test]
    fn decode_single_pixel() {
        let data = farbfeld(1, 1, &[[0xff, 0x80, 0x00, 0xff]]);

        let icon = decode(&data).unwrap();

        assert_eq!(icon, vec![1, 1, 0xffff8000]);
    }

    #[test]
    fn decode_dimensions_first() {
        let data = farbfeld(2, 1, &[[0, 0, 0, 0], [0xab, 0xcd, 0xef, 0x12]]);

        let icon = decode(&data).unwrap();

        assert_eq!(&icon[..2], &[2, 1]);
        assert_eq!(icon[3], 0x12abcdef);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = farbfeld(1, 1, &[[0, 0, 0, 0]]);

        data[0] = b'x';

        assert!(decode(&data).is_err());
    }

    #[test]
    fn rejects_truncated_image() {
        let mut data = farbfeld(2, 2, &[[0, 0, 0, 0]; 4]);

        data.truncate(HEADER + 8);

        assert!(decode(&data).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load("/nonexistent/icon.ff").is_err());
    }
}
