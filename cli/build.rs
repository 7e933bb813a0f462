fn main() {
    // Only embed version resources on Windows
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();

        let version = env!("CARGO_PKG_VERSION");
        let parts: Vec<&str> = version.split('.').collect();
        let version_string = format!(
            "{}.{}.{}.0",
            parts.first().unwrap_or(&"0"),
            parts.get(1).unwrap_or(&"0"),
            parts.get(2).unwrap_or(&"0")
        );

        res.set("ProductName", "Parquet Viewer")
            .set("FileDescription", "View Parquet files as JSON")
            .set("FileVersion", &version_string)
            .set("ProductVersion", version);

        if let Err(e) = res.compile() {
            eprintln!("Warning: Failed to compile Windows resources: {}", e);
        }
    }
}
