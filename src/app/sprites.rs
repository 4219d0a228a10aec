//! Sprite fetching and caching
//!
//! Sprites come from the public PokeAPI sprite repository, land in the disk
//! cache, and are decoded into egui textures on first use. Prefetching is
//! bounded by a semaphore so startup does not flood the host.

use super::App;
use crate::catalog;
use eframe::egui;
use tracing::debug;

fn cache_key(id: u32, shiny: bool) -> String {
    if shiny {
        format!("{}_shiny", id)
    } else {
        id.to_string()
    }
}

fn cache_file(cache_dir: &std::path::Path, id: u32, shiny: bool) -> std::path::PathBuf {
    if shiny {
        cache_dir.join("sprites").join("shiny").join(format!("{}.png", id))
    } else {
        cache_dir.join("sprites").join(format!("{}.png", id))
    }
}

impl App {
    /// Warm the disk cache for the whole dex in the background.
    pub fn start_sprite_prefetch(&mut self, ctx: &egui::Context) {
        let cache_dir = self.cache_dir.clone();
        let ctx_clone = ctx.clone();
        let token = self.shutdown.clone();
        let ids: Vec<u32> = catalog::all().iter().map(|p| p.id).collect();

        debug!(count = ids.len(), "Starting sprite prefetch");

        self.runtime.spawn(async move {
            let client = reqwest::Client::new();
            let semaphore = std::sync::Arc::new(tokio::sync::Semaphore::new(8));

            let sprite_dir = cache_dir.join("sprites");
            std::fs::create_dir_all(&sprite_dir).ok();

            let mut handles = vec![];

            for id in ids {
                if token.is_cancelled() {
                    break;
                }
                let sprite_path = sprite_dir.join(format!("{}.png", id));
                if sprite_path.exists() {
                    continue;
                }

                let sem = semaphore.clone();
                let client = client.clone();
                let ctx = ctx_clone.clone();
                let token = token.clone();
                let url = catalog::by_id(id)
                    .map(|p| p.sprite_url())
                    .unwrap_or_default();

                let handle = tokio::spawn(async move {
                    let _permit = sem.acquire().await.ok();
                    if token.is_cancelled() {
                        return;
                    }
                    if let Ok(response) = client.get(&url).send().await {
                        if response.status().is_success() {
                            if let Ok(bytes) = response.bytes().await {
                                std::fs::write(&sprite_path, &bytes).ok();
                                ctx.request_repaint();
                            }
                        }
                    }
                });
                handles.push(handle);
            }

            for handle in handles {
                handle.await.ok();
            }
        });
    }

    /// Texture for a sprite, if it is already cached. A miss schedules an
    /// on-demand fetch and returns None; the repaint after the download
    /// picks the file up from disk.
    pub fn load_sprite(
        &mut self,
        ctx: &egui::Context,
        id: u32,
        shiny: bool,
    ) -> Option<egui::TextureHandle> {
        let key = cache_key(id, shiny);
        if let Some(cached) = self.sprite_cache.get(&key) {
            return cached.clone();
        }

        let path = cache_file(&self.cache_dir, id, shiny);
        if path.exists() {
            let texture = image::open(&path).ok().map(|img| {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.into_raw();
                ctx.load_texture(
                    &key,
                    egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
                    egui::TextureOptions::NEAREST,
                )
            });
            self.sprite_cache.insert(key, texture.clone());
            return texture;
        }

        self.fetch_sprite(ctx, id, shiny);
        None
    }

    fn fetch_sprite(&mut self, ctx: &egui::Context, id: u32, shiny: bool) {
        let key = cache_key(id, shiny);
        if self.sprite_loading.contains(&key) {
            return;
        }
        self.sprite_loading.insert(key);

        let Some(pokemon) = catalog::by_id(id) else {
            return;
        };
        let url = if shiny {
            pokemon.shiny_sprite_url()
        } else {
            pokemon.sprite_url()
        };
        let path = cache_file(&self.cache_dir, id, shiny);
        let ctx_clone = ctx.clone();

        self.runtime.spawn(async move {
            if let Ok(response) = reqwest::get(&url).await {
                if response.status().is_success() {
                    if let Ok(bytes) = response.bytes().await {
                        if let Some(parent) = path.parent() {
                            std::fs::create_dir_all(parent).ok();
                        }
                        std::fs::write(&path, &bytes).ok();
                    }
                }
            }
            ctx_clone.request_repaint();
        });
    }
}
