//! Scripted backend for exercising dispatch without touching pixels.

use image::{DynamicImage, ImageError, ImageResult};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::backend::ImageBackend;

#[derive(Default)]
pub(crate) struct ScriptedBackend {
    delays: HashMap<String, Duration>,
    fail_open: HashSet<String>,
    fail_save: HashSet<String>,
    panic_on: HashSet<String>,
    opened: AtomicUsize,
    saved: Mutex<Vec<String>>,
    transforms: Mutex<Vec<String>>,
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn scripted_error(what: &str) -> ImageError {
    ImageError::IoError(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("scripted {what} failure"),
    ))
}

impl ScriptedBackend {
    pub fn delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn fail_open(mut self, name: &str) -> Self {
        self.fail_open.insert(name.to_string());
        self
    }

    pub fn fail_save(mut self, name: &str) -> Self {
        self.fail_save.insert(name.to_string());
        self
    }

    pub fn panic_on(mut self, name: &str) -> Self {
        self.panic_on.insert(name.to_string());
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn saved(&self) -> Vec<String> {
        self.saved.lock().unwrap().clone()
    }

    pub fn transforms(&self) -> Vec<String> {
        self.transforms.lock().unwrap().clone()
    }
}

impl ImageBackend for ScriptedBackend {
    fn open(&self, path: &Path) -> ImageResult<DynamicImage> {
        let name = name_of(path);
        if self.panic_on.contains(&name) {
            panic!("scripted panic for {name}");
        }
        if let Some(delay) = self.delays.get(&name) {
            std::thread::sleep(*delay);
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        if self.fail_open.contains(&name) {
            return Err(scripted_error("open"));
        }
        Ok(DynamicImage::new_rgb8(2, 2))
    }

    fn tone_remap(&self, image: DynamicImage) -> ImageResult<DynamicImage> {
        self.transforms.lock().unwrap().push("grayscale".to_string());
        Ok(image)
    }

    fn spatial_blur(&self, image: DynamicImage, sigma: f32) -> ImageResult<DynamicImage> {
        self.transforms.lock().unwrap().push(format!("blur:{sigma}"));
        Ok(image)
    }

    fn save(&self, _image: &DynamicImage, path: &Path) -> ImageResult<()> {
        if self.fail_save.contains(&name_of(path)) {
            return Err(scripted_error("save"));
        }
        self.saved.lock().unwrap().push(path.display().to_string());
        Ok(())
    }
}
