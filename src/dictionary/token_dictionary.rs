use std::{
    fs::{
        self,
        File,
    },
    io::{
        self,
        BufReader,
        BufWriter,
    },
    path::{
        Path,
        PathBuf,
    },
};

use liblzma::read::XzDecoder;
use tar::Archive;
use vibrato::{
    Dictionary,
    Tokenizer,
};
use zstd::stream::copy_decode;

use crate::{
    core::{
        http::{
            download_to_file,
            http_client,
        },
        CloudError,
    },
    persistence::get_app_data_dir,
};

fn get_tokenizer_dict_dir() -> PathBuf {
    get_app_data_dir().join("dictionaries")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DictType {
    #[default]
    Ipadic,
    Unidic,
}

impl DictType {
    fn url(&self) -> &str {
        match self {
            DictType::Unidic => {
                "https://github.com/daac-tools/vibrato/releases/download/v0.5.0/bccwj-suw+unidic-cwj-3_1_1.tar.xz"
            }
            DictType::Ipadic => {
                "https://github.com/daac-tools/vibrato/releases/download/v0.5.0/ipadic-mecab-2_7_0.tar.xz"
            }
        }
    }

    fn folder_name(&self) -> &str {
        match self {
            DictType::Unidic => "bccwj-suw+unidic-cwj-3_1_1",
            DictType::Ipadic => "ipadic-mecab-2_7_0",
        }
    }

    /// Feature column holding the dictionary form (IPADIC 原形, UniDic orthBase).
    pub fn lemma_index(&self) -> usize {
        match self {
            DictType::Unidic => 10,
            DictType::Ipadic => 6,
        }
    }
}

fn cleanup_files(folder_path: &Path, keep_files: &[&str]) -> Result<(), CloudError> {
    let keep_paths: Vec<PathBuf> = keep_files.iter().map(|f| folder_path.join(f)).collect();

    for entry in fs::read_dir(folder_path)? {
        let path = entry?.path();
        if keep_paths.contains(&path) {
            continue;
        }

        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }

    tracing::debug!("Cleanup complete. Retained files: {:?}", keep_files);
    Ok(())
}

/// Returns the cached `system.dic` for `dict_type`, downloading and unpacking the release
/// archive first when it is not cached yet.
pub fn ensure_dictionary(dict_type: &DictType) -> Result<PathBuf, CloudError> {
    let folder_name = dict_type.folder_name();
    let dict_dir = get_tokenizer_dict_dir();
    let extract_path = dict_dir.join(folder_name);
    let final_dic_path = extract_path.join("system.dic");

    if final_dic_path.exists() {
        tracing::debug!("Using cached analyzer dictionary {}", final_dic_path.display());
        return Ok(final_dic_path);
    }

    fs::create_dir_all(&dict_dir).map_err(|e| {
        CloudError::Custom(format!("Failed to create dictionary directory {:?}: {}", dict_dir, e))
    })?;

    // Leftovers from an interrupted run
    let download_path = dict_dir.join(format!("{}.tar.xz", folder_name));
    let tar_path = dict_dir.join(format!("{}.tar", folder_name));
    fs::remove_file(&download_path).ok();
    fs::remove_file(&tar_path).ok();
    fs::remove_dir_all(&extract_path).ok();

    tracing::info!("Downloading analyzer dictionary {}...", folder_name);
    let client = http_client()?;
    download_to_file(&client, dict_type.url(), &download_path)?;

    if download_path.metadata()?.len() == 0 {
        return Err(CloudError::Custom(format!(
            "Downloaded file {:?} is empty. Check your internet connection.",
            download_path
        )));
    }

    tracing::info!("Extracting analyzer dictionary...");
    let mut tar_file = File::create(&tar_path)?;
    let mut xz_decoder = XzDecoder::new(BufReader::new(File::open(&download_path)?));
    io::copy(&mut xz_decoder, &mut tar_file).map_err(|e| {
        CloudError::Custom(format!("Failed to decompress XZ to TAR: {}. Possible corrupt download.", e))
    })?;

    let mut archive = Archive::new(BufReader::new(File::open(&tar_path)?));
    archive.unpack(&extract_path).map_err(|e| {
        CloudError::Custom(format!("Failed to unpack TAR to {:?}: {}.", extract_path, e))
    })?;

    let zst_path = extract_path.join(folder_name).join("system.dic.zst");
    if !zst_path.exists() {
        return Err(CloudError::Custom(format!(
            "ZST file not found at {:?} after extraction.",
            zst_path
        )));
    }

    let dic_file = File::create(&final_dic_path)?;
    copy_decode(BufReader::new(File::open(&zst_path)?), BufWriter::new(dic_file)).map_err(|e| {
        CloudError::Custom(format!("Failed to decompress ZST to {:?}: {}.", final_dic_path, e))
    })?;

    // Dictionary licenses travel with the binary
    let inner_path = extract_path.join(folder_name);
    for license in ["BSD", "NOTICE", "COPYING"] {
        let source = inner_path.join(license);
        if source.exists() {
            fs::rename(&source, extract_path.join(license))?;
        }
    }

    cleanup_files(&extract_path, &["system.dic", "BSD", "NOTICE", "COPYING"])?;
    fs::remove_file(&download_path)?;
    fs::remove_file(&tar_path)?;

    tracing::info!("Analyzer dictionary ready at {}", final_dic_path.display());
    Ok(final_dic_path)
}

pub fn load_dictionary(path: &Path) -> Result<Dictionary, CloudError> {
    if !path.exists() {
        return Err(CloudError::FailedToLoadFile(format!(
            "analyzer dictionary {} does not exist",
            path.display()
        )));
    }
    let reader = BufReader::new(File::open(path)?);
    let dict = Dictionary::read(reader)?;
    Ok(dict)
}

/// Loads the analyzer from `dict_path` when given, otherwise from the cached download.
pub fn init_vibrato(dict_type: &DictType, dict_path: Option<&Path>) -> Result<Tokenizer, CloudError> {
    let dict = match dict_path {
        Some(path) => load_dictionary(path)?,
        None => load_dictionary(&ensure_dictionary(dict_type)?)?,
    };
    Ok(Tokenizer::new(dict))
}
