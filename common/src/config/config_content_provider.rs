use std::io::ErrorKind;
use std::sync::Mutex;

/// Raw storage behind a config. `Ok(None)` means nothing has been stored yet.
pub trait ConfigContentProvider {
    fn get_config_content(&self) -> Result<Option<String>, String>;
    fn set_config_content(&self, content: &str) -> Result<(), String>;
    fn clear_config_content(&self) -> Result<(), String>;
}

pub struct FileContentConfigProvider {
    file_path: String,
}

impl FileContentConfigProvider {
    pub fn new(file_path: String) -> Self {
        Self { file_path }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Failed to read config file {}: {}", self.file_path, err)),
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        std::fs::write(&self.file_path, content)
            .map_err(|e| format!("Failed to write config file {}: {}", self.file_path, e))
    }

    fn clear_config_content(&self) -> Result<(), String> {
        match std::fs::remove_file(&self.file_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(format!("Failed to remove config file {}: {}", self.file_path, err)),
        }
    }
}

#[derive(Default)]
pub struct MemoryContentConfigProvider {
    content: Mutex<Option<String>>,
}

impl MemoryContentConfigProvider {
    pub fn new(content: Option<String>) -> Self {
        Self {
            content: Mutex::new(content),
        }
    }
}

impl ConfigContentProvider for MemoryContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        let content = self.content.lock().map_err(|e| e.to_string())?;
        Ok(content.clone())
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        *self.content.lock().map_err(|e| e.to_string())? = Some(content.to_string());
        Ok(())
    }

    fn clear_config_content(&self) -> Result<(), String> {
        *self.content.lock().map_err(|e| e.to_string())? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_xo_provider_{}.yaml", random_number));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let provider = FileContentConfigProvider::new(get_temp_file_path());
        assert_eq!(provider.get_config_content(), Ok(None));
    }

    #[test]
    fn test_file_write_read_clear() {
        let provider = FileContentConfigProvider::new(get_temp_file_path());
        provider.set_config_content("mode: PlayerVsPlayer\n").unwrap();
        assert_eq!(
            provider.get_config_content(),
            Ok(Some("mode: PlayerVsPlayer\n".to_string()))
        );
        provider.clear_config_content().unwrap();
        assert_eq!(provider.get_config_content(), Ok(None));
        assert!(provider.clear_config_content().is_ok());
    }

    #[test]
    fn test_memory_provider() {
        let provider = MemoryContentConfigProvider::default();
        assert_eq!(provider.get_config_content(), Ok(None));
        provider.set_config_content("a: 1").unwrap();
        assert_eq!(provider.get_config_content(), Ok(Some("a: 1".to_string())));
        provider.clear_config_content().unwrap();
        assert_eq!(provider.get_config_content(), Ok(None));
    }
}
