/// Absolute path of a file under the crate's `assets/` directory.
#[macro_export]
macro_rules! asset_path {
    ($path:literal) => {
        concat!(env!("CARGO_MANIFEST_DIR"), "/assets/", $path)
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn paths_resolve_under_the_crate() {
        let path = std::path::Path::new(crate::config::GRASS_TILESET);

        assert!(path.is_absolute());
        assert!(path.ends_with("assets/tileset/TX Tileset Grass.png"));
    }
}
