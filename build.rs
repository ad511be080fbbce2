//! Compiles the URL storage protocol buffers using tonic-prost-build.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use the vendored protoc unless one is provided explicitly
    if std::env::var_os("PROTOC").is_none() {
        let protoc = protoc_bin_vendored::protoc_bin_path()?;
        // SAFETY: build scripts are single-threaded
        unsafe {
            std::env::set_var("PROTOC", protoc);
        }
    }

    // Client for the gateway; server stub for in-process wire tests
    tonic_prost_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(&["proto/url_storage.proto"], &["proto"])?;

    println!("cargo:rerun-if-changed=proto/");

    Ok(())
}
