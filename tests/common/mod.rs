#![allow(dead_code)]

use std::{io::Cursor, path::Path, path::PathBuf};

use spritereel::MemorySource;

/// Shape of a synthetic reel.
#[derive(Clone, Debug)]
pub struct ReelSpec {
    pub width: u32,
    pub height: u32,
    pub block: u32,
    pub grid: u32,
    pub fps: f64,
    pub sheets: u32,
    pub format: &'static str,
    pub frames: Vec<String>,
}

impl ReelSpec {
    /// The 64x32, 32px-block, 10 fps reel used by the playback scenarios.
    pub fn scenario(frames: &[&str]) -> Self {
        Self {
            width: 64,
            height: 32,
            block: 32,
            grid: 2,
            fps: 10.0,
            sheets: 1,
            format: "PNG",
            frames: frames.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn manifest_json(&self) -> Vec<u8> {
        serde_json::to_vec_pretty(&serde_json::json!({
            "videoWidth": self.width,
            "videoHeight": self.height,
            "imagesRequired": self.sheets,
            "frameCount": self.frames.len(),
            "blockSize": self.block,
            "sourceGrid": self.grid,
            "framesPerSecond": self.fps,
            "format": self.format,
            "frames": self.frames,
        }))
        .unwrap()
    }

    /// Every file of the reel: manifest, base image (solid grey) and sprite sheets whose pixels
    /// read `[sheet, block column, block row, 255]`.
    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        let mut out = vec![
            ("manifest.json".to_owned(), self.manifest_json()),
            (
                "first.png".to_owned(),
                png(self.width, self.height, |_, _| [128, 128, 128, 255]),
            ),
        ];
        let side = self.grid * self.block;
        let block = self.block;
        for sheet in 1..=self.sheets {
            out.push((
                format!("diff_{sheet:03}.png"),
                png(side, side, |x, y| {
                    [sheet as u8, (x / block) as u8, (y / block) as u8, 255]
                }),
            ));
        }
        out
    }

    pub fn memory_source(&self) -> MemorySource {
        let mut src = MemorySource::new();
        for (name, bytes) in self.files() {
            src.insert(name, bytes);
        }
        src
    }

    pub fn write_to(&self, dir: &Path) {
        std::fs::create_dir_all(dir).unwrap();
        for (name, bytes) in self.files() {
            std::fs::write(dir.join(name), bytes).unwrap();
        }
    }
}

pub fn png(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| image::Rgba(f(x, y)));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

pub fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "spritereel_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

/// Route library logs to the test harness; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
