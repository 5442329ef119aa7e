use super::*;

#[test]
fn closures_act_as_samplers() {
    let cap = SamplerCapability::available(|| Ok::<_, SampleError>(Rgb8::new(1, 2, 3)));
    assert!(cap.is_available());
    let SamplerCapability::Available(s) = cap else {
        panic!("expected available sampler");
    };
    assert_eq!(s.sample(), Ok(Rgb8::new(1, 2, 3)));
}

#[test]
fn default_capability_is_unavailable() {
    let cap = SamplerCapability::default();
    assert!(!cap.is_available());
    assert_eq!(format!("{cap:?}"), "Unavailable");
}

#[test]
fn error_messages_are_descriptive() {
    assert!(SampleError::Unsupported.to_string().contains("not supported"));
    assert!(SampleError::Cancelled.to_string().contains("cancelled"));
    assert!(
        SampleError::Failed("denied".into())
            .to_string()
            .contains("denied")
    );
}
