//! Region image loading: `fetch` + decode, deduplicated by path.
//!
//! Every region of one panel loads concurrently and the results are joined
//! before the panel is composited, so a slow region never leaves a half-drawn
//! texture. Tasks keep only a `Weak` to the scene and do nothing once it is gone.

use crate::scene::SceneManager;
use carousel_core::decode_image;
use fnv::FnvHashMap;
use futures_util::future::{join_all, LocalBoxFuture, Shared};
use futures_util::FutureExt;
use image::RgbaImage;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub type LoadedImage = Option<Rc<RgbaImage>>;
type PendingImage = Shared<LocalBoxFuture<'static, LoadedImage>>;

/// Decoded images keyed by path. A path is fetched once even when several
/// panels ask for it while the first request is still in flight.
#[derive(Clone, Default)]
pub struct ImageCache {
    entries: Rc<RefCell<FnvHashMap<String, PendingImage>>>,
}

impl ImageCache {
    pub fn load(&self, path: &str) -> PendingImage {
        if let Some(pending) = self.entries.borrow().get(path) {
            return pending.clone();
        }
        let owned = path.to_string();
        let pending = async move {
            match fetch_image(&owned).await {
                Ok(img) => {
                    log::debug!("[texture] loaded {} ({}x{})", owned, img.width(), img.height());
                    Some(Rc::new(img))
                }
                Err(e) => {
                    log::warn!("[texture] failed to load {}: {:#}", owned, e);
                    None
                }
            }
        }
        .boxed_local()
        .shared();
        self.entries
            .borrow_mut()
            .insert(path.to_string(), pending.clone());
        pending
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

async fn fetch_image(path: &str) -> anyhow::Result<RgbaImage> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let response: web::Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !response.ok() {
        anyhow::bail!("HTTP {}", response.status());
    }
    let buffer = JsFuture::from(response.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(decode_image(&bytes)?)
}

/// Start one load task per panel that names any region image.
pub fn spawn_panel_loads(scene: &Rc<RefCell<SceneManager>>, cache: &ImageCache) {
    let requests: Vec<(usize, SmallVec<[Option<String>; 3]>)> = scene
        .borrow()
        .slides()
        .iter()
        .enumerate()
        .filter(|(_, slide)| slide.has_images())
        .map(|(index, slide)| {
            let paths = slide
                .region_images()
                .iter()
                .map(|p| p.map(str::to_owned))
                .collect();
            (index, paths)
        })
        .collect();

    for (index, paths) in requests {
        let loads: Vec<_> = paths
            .iter()
            .map(|path| {
                let pending = path.as_deref().map(|p| cache.load(p));
                async move {
                    match pending {
                        Some(p) => p.await,
                        None => None,
                    }
                }
            })
            .collect();
        let weak = Rc::downgrade(scene);
        spawn_local(async move {
            let results = join_all(loads).await;
            let Some(scene) = weak.upgrade() else {
                return;
            };
            scene.borrow_mut().composite_panel(index, &results);
        });
    }
}
