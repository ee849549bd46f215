use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use loopscout_core::ast::{
    BinaryOp, Block, CallExpression, Expression, IfStatement, MethodDeclaration, NodeId, Program,
    Statement, WhileStatement,
};
use loopscout_core::{AnalysisPass, LibraryModel, SelectLoopsPass, SelectionReport};

fn ident(name: &str) -> Expression {
    Expression::Identifier {
        name: name.to_string(),
    }
}

fn block(statements: Vec<Statement>) -> Block {
    Block {
        id: NodeId::default(),
        statements,
    }
}

fn math_call(name: &str, arg: &str) -> Statement {
    Statement::Expression {
        expression: Expression::Assignment {
            target: Box::new(Expression::ArrayAccess {
                array: Box::new(ident("a")),
                index: Box::new(ident("i")),
            }),
            value: Box::new(Expression::Call(CallExpression {
                target: None,
                receiver_type: Some("Math".to_string()),
                name: name.to_string(),
                arguments: vec![ident(arg)],
            })),
        },
    }
}

/// A method with `width` sibling loop nests, each `depth` loops deep.
fn nested_loops(width: usize, depth: usize) -> Program {
    let mut statements = Vec::with_capacity(width);
    for _ in 0..width {
        let mut body = vec![
            math_call("sqrt", "x"),
            Statement::If(IfStatement {
                condition: ident("done"),
                then_block: block(vec![Statement::Break { label: None }]),
                else_block: None,
            }),
        ];
        for _ in 0..depth {
            body = vec![
                math_call("abs", "y"),
                Statement::While(WhileStatement {
                    id: NodeId::default(),
                    condition: Expression::Binary {
                        op: BinaryOp::LessThan,
                        left: Box::new(ident("i")),
                        right: Box::new(ident("n")),
                    },
                    body: block(body),
                }),
            ];
        }
        statements.extend(body);
    }

    let mut program = Program::new(vec![MethodDeclaration {
        id: NodeId::default(),
        name: "kernel".to_string(),
        params: vec!["a".to_string(), "n".to_string()],
        body: block(statements),
    }]);
    program.renumber();
    program
}

fn bench_select_loops(c: &mut Criterion) {
    let program = nested_loops(8, 4);
    let model = LibraryModel::builtin();

    c.bench_function("select_loops_8x4", |b| {
        b.iter(|| {
            let mut pass = SelectLoopsPass::new(&model);
            black_box(pass.run(black_box(&program)));
        })
    });
}

fn bench_select_loops_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_loops_scaling");
    let model = LibraryModel::builtin();

    for width in [10, 100, 1000].iter() {
        let program = nested_loops(*width, 3);
        group.bench_with_input(BenchmarkId::from_parameter(width), &program, |b, p| {
            b.iter(|| {
                let mut pass = SelectLoopsPass::new(&model);
                black_box(pass.run(black_box(p)));
            })
        });
    }
    group.finish();
}

fn bench_report_with_indexes(c: &mut Criterion) {
    let program = nested_loops(100, 3);
    let model = LibraryModel::builtin();
    let analysis = SelectLoopsPass::new(&model).run(&program);
    let arrays = vec!["a".to_string()];

    c.bench_function("report_with_indexes", |b| {
        b.iter(|| {
            let report = SelectionReport::build_with_indexes(&program, &analysis, &arrays);
            black_box(&report);
        })
    });
}

criterion_group!(
    benches,
    bench_select_loops,
    bench_select_loops_scaling,
    bench_report_with_indexes
);
criterion_main!(benches);
