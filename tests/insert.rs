use routree::{Compose, InsertError, Router};

#[derive(Clone, Debug, PartialEq)]
struct Tag(&'static str);

impl Compose for Tag {
    fn compose(stack: &[Self]) -> Self {
        stack.first().cloned().unwrap_or(Tag(""))
    }
}

struct InsertTest(Vec<(&'static str, &'static str, Result<(), InsertError>)>);

impl InsertTest {
    fn run(self) {
        let mut router = Router::new();
        for (method, route, expected) in self.0 {
            let got = router.insert(method, route, vec![Tag(route)]);
            assert_eq!(got, expected, "{method} {route}");
        }
    }
}

fn conflict(with: &'static str) -> Result<(), InsertError> {
    Err(InsertError::Conflict { with: with.into() })
}

fn repeat(param: &'static str) -> Result<(), InsertError> {
    Err(InsertError::RepeatModifier {
        param: param.into(),
    })
}

#[test]
fn functional_duplicates() {
    InsertTest(vec![
        ("GET", "/foo/:id", Ok(())),
        ("GET", "/foo/:name", conflict("/foo/:id")),
        ("GET", "/foo/bar", Ok(())),
        ("GET", "/foo/:id", conflict("/foo/:id")),
        ("GET", r"/foo/:id(\d+)", Ok(())),
        ("GET", r"/foo/:num(\d+)", conflict(r"/foo/:id(\d+)")),
        ("GET", "/foo/:id/baz", Ok(())),
        ("GET", "/foo/:other/baz", conflict("/foo/:id/baz")),
        ("GET", "/foo/bar/baz", Ok(())),
    ])
    .run()
}

#[test]
fn shapes_differ_by_modifier() {
    InsertTest(vec![
        ("GET", "/a/:id", Ok(())),
        ("GET", "/a/:id?", Ok(())),
        ("GET", "/a/ab-:id", Ok(())),
        ("GET", "/a/:opt?", conflict("/a/:id?")),
    ])
    .run()
}

#[test]
fn methods_do_not_conflict() {
    InsertTest(vec![
        ("GET", "/users/:id", Ok(())),
        ("POST", "/users/:id", Ok(())),
        ("PUT", "/users/:id", Ok(())),
        ("PATCH", "/users/:id", Ok(())),
        ("DELETE", "/users/:id", Ok(())),
        ("GET", "/users/:name", conflict("/users/:id")),
    ])
    .run()
}

#[test]
fn repeat_modifiers_are_rejected() {
    InsertTest(vec![
        ("GET", "/:foo+", repeat("foo")),
        ("GET", "/:foo*", repeat("foo")),
        ("GET", r"/files/:path(\S+)*", repeat("path")),
        ("GET", "/ok/:foo", Ok(())),
    ])
    .run()
}

#[test]
fn unsupported_methods_are_rejected() {
    InsertTest(vec![
        (
            "TRACE",
            "/anything",
            Err(InsertError::UnsupportedMethod {
                method: "TRACE".into(),
            }),
        ),
        (
            "get",
            "/anything",
            Err(InsertError::UnsupportedMethod {
                method: "get".into(),
            }),
        ),
        ("GET", "/anything", Ok(())),
    ])
    .run()
}

#[test]
fn invalid_custom_groups_are_rejected() {
    InsertTest(vec![(
        "GET",
        r"/users/:id(\d+",
        Err(InsertError::InvalidPattern {
            segment: r":id(\d+".into(),
        }),
    )])
    .run()
}

#[test]
fn failed_insertion_leaves_the_router_untouched() {
    let mut router = Router::new();
    router.insert("GET", "/foo/:id", vec![Tag("a")]).unwrap();
    router
        .insert("GET", "/foo/:name/extra+bad/:x+", vec![Tag("b")])
        .unwrap_err();
    router.insert("GET", "/foo/:name", vec![Tag("c")]).unwrap_err();
    router.sort();

    let matched = router.at("GET", "/foo/7").unwrap();
    assert_eq!(matched.middleware, [Tag("a")]);
    assert_eq!(matched.pattern, "/foo/:id");
}

#[test]
fn catch_all_routes_conflict_with_same_shape() {
    let mut router = Router::new();
    router
        .insert_catch_all("GET", "/files/:dir", vec![Tag("files")])
        .unwrap();

    let err = router
        .insert("GET", "/files/:other", vec![Tag("dup")])
        .unwrap_err();
    assert_eq!(
        err,
        InsertError::Conflict {
            with: "/files/:dir".into()
        }
    );
}

#[test]
fn root_route() {
    let mut router = Router::new();
    router.insert("GET", "/", vec![Tag("root")]).unwrap();
    let err = router.insert("GET", "/", vec![Tag("dup")]).unwrap_err();
    assert_eq!(err, InsertError::Conflict { with: "/".into() });
}
