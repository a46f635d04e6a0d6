// src/services/assets.rs

use std::path::{Path, PathBuf};

/// Imagens de marca usadas no PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Logo,
    Signature,
}

/// Resolve as imagens de marca. Ausência não é erro: o PDF usa um placeholder.
pub trait AssetSource: Send + Sync {
    fn fetch(&self, asset: Asset) -> Option<Vec<u8>>;
}

/// Lê as imagens de um diretório fixo.
#[derive(Debug, Clone)]
pub struct DirAssetSource {
    dir: PathBuf,
    logo_file: String,
    signature_file: String,
}

impl DirAssetSource {
    pub fn new(
        dir: impl Into<PathBuf>,
        logo_file: impl Into<String>,
        signature_file: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            logo_file: logo_file.into(),
            signature_file: signature_file.into(),
        }
    }

    pub fn path_of(&self, asset: Asset) -> PathBuf {
        let file = match asset {
            Asset::Logo => &self.logo_file,
            Asset::Signature => &self.signature_file,
        };
        self.dir.join(file)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AssetSource for DirAssetSource {
    fn fetch(&self, asset: Asset) -> Option<Vec<u8>> {
        let path = self.path_of(asset);
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!("Imagem {:?} indisponível em {}: {}", asset, path.display(), e);
                None
            }
        }
    }
}

/// Nenhuma imagem (testes e ambientes sem diretório de assets).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetSource for NoAssets {
    fn fetch(&self, _asset: Asset) -> Option<Vec<u8>> {
        None
    }
}
