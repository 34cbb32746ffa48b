// Build script for interview-service
// Compiles interview_service.proto for gRPC server and client code generation
fn main() {
    println!("cargo:rerun-if-changed=../proto/services/interview_service.proto");

    let out_dir = std::path::PathBuf::from(
        std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo for build scripts"),
    );

    // Client code is also generated for integration tests
    // Descriptor set feeds the gRPC reflection service
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .file_descriptor_set_path(out_dir.join("interview_descriptor.bin"))
        .compile_protos(
            &["../proto/services/interview_service.proto"],
            &["../proto/services"],
        )
        .expect("Failed to compile interview_service.proto for interview-service");
}
