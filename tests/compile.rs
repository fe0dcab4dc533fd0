use curly::{PathTemplate, Router, TemplateError};

struct CompileTest(Vec<(&'static str, Result<(), TemplateError>)>);

impl CompileTest {
    fn run(self) {
        for (template, expected) in self.0 {
            let got = PathTemplate::new(template).map(|_| ());
            assert_eq!(got, expected, "{template}");
        }
    }
}

fn malformed(segment: &str) -> TemplateError {
    TemplateError::MalformedSegment {
        segment: segment.into(),
    }
}

#[test]
fn valid_templates() {
    CompileTest(vec![
        ("/", Ok(())),
        ("", Ok(())),
        ("/p/{q}", Ok(())),
        ("/p/{q}/", Ok(())),
        ("/{x:*}", Ok(())),
        ("/{:*}", Ok(())),
        ("/{:hola}", Ok(())),
        ("/a/{x:[A-Z][A-Z]}", Ok(())),
        ("/zip/{code:^[0-9]{4}[A-Z]{2}$}", Ok(())),
        ("/files/{path:^[a-z/]+$}", Ok(())),
        ("/resources:run", Ok(())),
        ("/users/{userId:^prefix-}:start", Ok(())),
        ("/{a:x}/{:y}/{:z}", Ok(())),
        ("/v1:2/items", Ok(())),
    ])
    .run()
}

#[test]
fn invalid_wildcard() {
    CompileTest(vec![
        ("/static/{var:*}/sub", Err(TemplateError::WildcardNotLast)),
        ("/{a:*}/b", Err(TemplateError::WildcardNotLast)),
        ("/{a:*}/{b:*}", Err(TemplateError::MultipleWildcards)),
        ("/{:*}/{:*}", Err(TemplateError::MultipleWildcards)),
    ])
    .run()
}

#[test]
fn invalid_custom_verb() {
    CompileTest(vec![
        (
            "/resources:run/sub",
            Err(TemplateError::CustomVerbNotLast { verb: "run".into() }),
        ),
        (
            "/{id}:start/{rest:*}",
            Err(TemplateError::CustomVerbNotLast {
                verb: "start".into(),
            }),
        ),
        (
            "/files/{path:*}:download",
            Err(TemplateError::CustomVerbOnWildcard {
                verb: "download".into(),
            }),
        ),
    ])
    .run()
}

#[test]
fn malformed_segments() {
    CompileTest(vec![
        ("/user_{name}", Err(malformed("user_{name}"))),
        ("/{id}.json", Err(malformed("{id}.json"))),
        ("/{foo}{bar}", Err(malformed("{foo}{bar}"))),
        ("/a/{b", Err(malformed("/a/{b"))),
        ("/a/b}", Err(malformed("/a/b}"))),
    ])
    .run()
}

#[test]
fn unnamed_and_duplicate_params() {
    CompileTest(vec![
        ("/{}", Err(TemplateError::UnnamedParam)),
        ("/cmd/{}/", Err(TemplateError::UnnamedParam)),
        (
            "/{id}/{id}",
            Err(TemplateError::DuplicateParam { name: "id".into() }),
        ),
        (
            "/{id}/{id:[0-9]+}",
            Err(TemplateError::DuplicateParam { name: "id".into() }),
        ),
        (
            "/{id}/{id:*}",
            Err(TemplateError::DuplicateParam { name: "id".into() }),
        ),
    ])
    .run()
}

#[test]
fn invalid_regex() {
    let err = PathTemplate::new("/{id:[0-9}").unwrap_err();
    match err {
        TemplateError::InvalidRegex { pattern, message } => {
            assert_eq!(pattern, "[0-9");
            assert!(!message.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn registration_reports_errors() {
    let mut router = Router::<()>::new();
    assert_eq!(
        router.insert("/a/{b:*}/c").unwrap_err(),
        TemplateError::WildcardNotLast
    );

    let service = router.insert("/users").unwrap();
    assert_eq!(
        service.get("/{id}/{id}", ()).unwrap_err(),
        TemplateError::DuplicateParam { name: "id".into() }
    );
    assert!(service.routes().is_empty());
    assert_eq!(router.services().len(), 1);
}

#[test]
fn error_messages() {
    assert_eq!(
        TemplateError::WildcardNotLast.to_string(),
        "wildcard parameters are only allowed at the end of a template"
    );
    assert_eq!(
        malformed("user_{name}").to_string(),
        "malformed template segment `user_{name}`"
    );
}
