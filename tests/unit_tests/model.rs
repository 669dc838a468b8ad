use crate::{steel, uniform_chain};
use barsolve::conditions::{BoundaryCondition, DistributedLoad, DistributedLoadKind};
use barsolve::material::{Material, MaterialTable};
use barsolve::mesh::{BarMesh, ElementBlock};
use barsolve::{solve_bar_model, AssemblyError, BarModel, SolverOptions};
use matrixcompare::{assert_matrix_eq, assert_scalar_eq};
use nalgebra::{DMatrix, DVector};
use proptest::prelude::*;

#[test]
fn steel_bar_end_to_end() {
    let block = ElementBlock::new("bar", 1.0, "steel").with_connectivity([[0, 1]]);
    let mesh = BarMesh::from_coordinates_and_blocks(vec![0.0, 1.0], vec![block]);
    let materials = MaterialTable::new().with_material("steel", steel());
    let model = BarModel::new(mesh, materials)
        .with_boundary_condition(BoundaryCondition::dirichlet(&[0], 0.0))
        .with_boundary_condition(BoundaryCondition::neumann(&[1], 1000.0));

    let solution = model.solve(&SolverOptions::default()).unwrap();

    #[rustfmt::skip]
    let expected_stiffness = DMatrix::from_row_slice(2, 2, &[
         2.1e11, -2.1e11,
        -2.1e11,  2.1e11
    ]);
    assert_matrix_eq!(solution.stiffness, expected_stiffness, comp = float);
    assert_eq!(solution.force, DVector::from_column_slice(&[0.0, 1000.0]));
    assert_eq!(solution.displacements[0], 0.0);
    assert_scalar_eq!(solution.displacements[1], 1000.0 / 2.1e11, comp = float);
    assert_scalar_eq!(solution.displacements[1], 4.7619047619047619e-9, comp = abs, tol = 1e-20);
}

#[test]
fn single_element_tip_displacement() {
    let (length, area, young, load) = (2.5, 0.01, 70e9, -3.0e4);
    let model = uniform_chain(1, length, area, young)
        .with_boundary_condition(BoundaryCondition::dirichlet(&[0], 0.0))
        .with_boundary_condition(BoundaryCondition::neumann(&[1], load));

    let solution = solve_bar_model(&model, &SolverOptions::default()).unwrap();
    let k = area * young / length;
    assert_matrix_eq!(
        solution.stiffness,
        DMatrix::from_row_slice(2, 2, &[k, -k, -k, k]),
        comp = float
    );
    assert_scalar_eq!(
        solution.displacements[1],
        load * length / (area * young),
        comp = abs,
        tol = 1e-15
    );
}

#[test]
fn distributed_axial_load_matches_exact_nodal_values() {
    // For a fixed-free bar under constant load q per unit length, the exact displacement is
    // u(x) = q / (EA) * (L x - x^2 / 2), which linear elements reproduce at the nodes.
    let (num_elements, h, area, young, q) = (4, 0.5, 2.0, 100.0, 3.0);
    let length = num_elements as f64 * h;
    let model = uniform_chain(num_elements, h, area, young)
        .with_boundary_condition(BoundaryCondition::dirichlet(&[0], 0.0))
        .with_distributed_load(DistributedLoad::new("q", DistributedLoadKind::Bx, 1.0, q, &[0, 1, 2, 3]));

    let solution = model.solve(&SolverOptions::default()).unwrap();
    for (node, u) in solution.displacements.iter().enumerate() {
        let x = node as f64 * h;
        let exact = q / (young * area) * (length * x - x * x / 2.0);
        assert_scalar_eq!(*u, exact, comp = abs, tol = 1e-12);
    }
}

#[test]
fn gravity_load_with_zero_density_leaves_result_unchanged() {
    let base = uniform_chain(3, 1.0, 1.0, 1e3)
        .with_boundary_condition(BoundaryCondition::dirichlet(&[0], 0.0))
        .with_boundary_condition(BoundaryCondition::neumann(&[3], 10.0));
    let mut weightless = base.clone().with_distributed_load(DistributedLoad::new(
        "gravity",
        DistributedLoadKind::Grav,
        -1.0,
        9.81,
        &[0, 1, 2],
    ));
    weightless.materials = MaterialTable::new().with_material("steel", Material::new(1e3, 0.0));

    let options = SolverOptions::default();
    let expected = base.solve(&options).unwrap();
    let solution = weightless.solve(&options).unwrap();
    assert_eq!(solution.force, expected.force);
    assert_eq!(solution.displacements, expected.displacements);
}

#[test]
fn gravity_hanging_bar() {
    // Bar hanging from node 0, gravity pulling in the positive direction along the bar
    let (num_elements, h, area, young, rho, g) = (5, 0.2, 0.5, 1e4, 8.0, 10.0);
    let length = num_elements as f64 * h;
    let mut model = uniform_chain(num_elements, h, area, young)
        .with_boundary_condition(BoundaryCondition::dirichlet(&[0], 0.0))
        .with_distributed_load(DistributedLoad::new(
            "gravity",
            DistributedLoadKind::Grav,
            1.0,
            g,
            &[0, 1, 2, 3, 4],
        ));
    model.materials = MaterialTable::new().with_material("steel", Material::new(young, rho));

    let solution = model.solve(&SolverOptions::default()).unwrap();
    let q = rho * area * g;
    assert_scalar_eq!(solution.force.sum(), q * length, comp = abs, tol = 1e-12);
    let tip = q * length * length / (2.0 * young * area);
    assert_scalar_eq!(solution.displacements[num_elements], tip, comp = abs, tol = 1e-12);
}

#[test]
fn reactions_balance_applied_loads() {
    let load = 250.0;
    let model = uniform_chain(4, 0.25, 1e-2, 2e5)
        .with_boundary_condition(BoundaryCondition::dirichlet(&[0], 0.0))
        .with_boundary_condition(BoundaryCondition::neumann(&[4], load));
    let solution = model.solve(&SolverOptions::default()).unwrap();

    let reactions = solution.reactions();
    assert_scalar_eq!(reactions[0], -load, comp = abs, tol = 1e-9);
    for r in reactions.iter().skip(1) {
        assert_scalar_eq!(*r, 0.0, comp = abs, tol = 1e-9);
    }
}

#[test]
fn element_responses_of_end_loaded_bar() {
    let (area, young, load) = (2.0, 1e3, 40.0);
    let model = uniform_chain(3, 0.5, area, young)
        .with_boundary_condition(BoundaryCondition::dirichlet(&[0], 0.0))
        .with_boundary_condition(BoundaryCondition::neumann(&[3], load));
    let solution = model.solve(&SolverOptions::default()).unwrap();

    let responses = solution.element_responses(&model).unwrap();
    assert_eq!(responses.len(), 3);
    for (id, response) in responses.iter().enumerate() {
        assert_eq!(response.element, id);
        assert_scalar_eq!(response.strain, load / (area * young), comp = abs, tol = 1e-12);
        assert_scalar_eq!(response.stress, load / area, comp = abs, tol = 1e-9);
        assert_scalar_eq!(response.axial_force, load, comp = abs, tol = 1e-9);
    }
}

#[test]
fn conflicting_dirichlet_conditions_use_last_value() {
    let model = uniform_chain(2, 1.0, 1.0, 1.0)
        .with_boundary_condition(BoundaryCondition::dirichlet(&[0], 0.0))
        .with_boundary_condition(BoundaryCondition::dirichlet(&[2], 1.0))
        .with_boundary_condition(BoundaryCondition::dirichlet(&[2], 4.0));
    let solution = model.solve(&SolverOptions::default()).unwrap();
    assert_matrix_eq!(
        solution.displacements,
        DVector::from_column_slice(&[0.0, 2.0, 4.0]),
        comp = abs,
        tol = 1e-14
    );
}

#[test]
fn degenerate_element_fails_the_solve() {
    let block = ElementBlock::new("bar", 1.0, "steel").with_connectivity([[0, 1], [1, 2]]);
    let mesh = BarMesh::from_coordinates_and_blocks(vec![0.0, 2.0, 2.0], vec![block]);
    let materials = MaterialTable::new().with_material("steel", steel());
    let model = BarModel::new(mesh, materials).with_boundary_condition(BoundaryCondition::dirichlet(&[0], 0.0));
    assert_eq!(
        model.solve(&SolverOptions::default()),
        Err(AssemblyError::DegenerateElement { nodes: [1, 2] })
    );
}

#[test]
fn reversed_element_with_distributed_load() {
    // Connectivity runs from node 1 to node 0, so the element length is -1
    let block = ElementBlock::new("bar", 1.0, "unit").with_connectivity([[1, 0]]);
    let mesh = BarMesh::from_coordinates_and_blocks(vec![0.0, 1.0], vec![block]);
    let materials = MaterialTable::new().with_material("unit", Material::new(1.0, 0.0));
    let model = BarModel::new(mesh, materials)
        .with_boundary_condition(BoundaryCondition::dirichlet(&[0], 0.0))
        .with_distributed_load(DistributedLoad::new("axial", DistributedLoadKind::Bx, 1.0, 2.0, &[0]));
    let solution = model.solve(&SolverOptions::default()).unwrap();

    #[rustfmt::skip]
    let expected_stiffness = DMatrix::from_row_slice(2, 2, &[
        -1.0,  1.0,
         1.0, -1.0
    ]);
    assert_matrix_eq!(solution.stiffness, expected_stiffness, comp = float);
    assert_matrix_eq!(solution.force, DVector::from_column_slice(&[-1.0, -1.0]), comp = float);
    assert_matrix_eq!(solution.displacements, DVector::from_column_slice(&[0.0, 1.0]), comp = float);
}

#[test]
fn high_stiffness_contrast_is_solved() {
    let stiff = ElementBlock::new("stiff", 1.0, "stiff").with_connectivity([[0, 1]]);
    let soft = ElementBlock::new("soft", 1.0, "soft").with_connectivity([[1, 2]]);
    let mesh = BarMesh::from_coordinates_and_blocks(vec![0.0, 1.0, 2.0], vec![stiff, soft]);
    let materials = MaterialTable::new()
        .with_material("stiff", Material::new(1e13, 0.0))
        .with_material("soft", Material::new(1.0, 0.0));
    let model = BarModel::new(mesh, materials)
        .with_boundary_condition(BoundaryCondition::dirichlet(&[0], 0.0))
        .with_boundary_condition(BoundaryCondition::neumann(&[2], 1.0));
    let solution = model.solve(&SolverOptions::default()).unwrap();

    assert_scalar_eq!(solution.displacements[1], 1e-13, comp = abs, tol = 1e-18);
    assert_scalar_eq!(solution.displacements[2], 1.0 + 1e-13, comp = abs, tol = 1e-12);
}

#[test]
fn element_responses_reject_mismatched_model() {
    let small = uniform_chain(1, 1.0, 1.0, 10.0)
        .with_boundary_condition(BoundaryCondition::dirichlet(&[0], 0.0))
        .with_boundary_condition(BoundaryCondition::neumann(&[1], 1.0));
    let solution = small.solve(&SolverOptions::default()).unwrap();

    let larger = uniform_chain(3, 1.0, 1.0, 10.0);
    assert_eq!(
        solution.element_responses(&larger),
        Err(AssemblyError::NodeOutOfBounds { node: 2, num_nodes: 2 })
    );
}

#[test]
fn unsupported_bar_is_singular() {
    let model = uniform_chain(2, 1.0, 1.0, 1.0).with_boundary_condition(BoundaryCondition::neumann(&[2], 1.0));
    assert_eq!(
        model.solve(&SolverOptions::default()),
        Err(AssemblyError::SingularSystem { num_free_dofs: 3 })
    );
}

#[test]
fn model_decodes_from_json() {
    let json = r#"{
        "mesh": {
            "coordinates": [0.0, 1.0, 2.0],
            "blocks": [
                { "name": "bar", "area": 1.0, "material": "steel", "connectivity": [[0, 1], [1, 2]] }
            ]
        },
        "materials": { "steel": { "young_modulus": 100.0, "density": 1.0 } },
        "boundary_conditions": [
            { "type": "DIRICHLET", "nodes": [0], "value": 0.0 },
            { "type": "NEUMANN", "nodes": [2], "value": 5.0 }
        ],
        "distributed_loads": [
            { "name": "axial", "type": "BX", "direction": [1.0], "value": 2.0, "elements": [1] }
        ],
        "element_map": {
            "0": { "block": 0, "local_element": 0 },
            "1": { "block": 0, "local_element": 1 }
        }
    }"#;
    let model: BarModel<f64> = serde_json::from_str(json).unwrap();
    let solution = model.solve(&SolverOptions::default()).unwrap();

    assert_matrix_eq!(solution.force, DVector::from_column_slice(&[0.0, 1.0, 6.0]), comp = float);
    // Element forces: 7 in the first element, 6 in the second
    assert_matrix_eq!(
        solution.displacements,
        DVector::from_column_slice(&[0.0, 0.07, 0.13]),
        comp = abs,
        tol = 1e-14
    );
}

proptest! {
    #[test]
    fn chain_with_end_load_has_linear_displacement(
        num_elements in 1usize .. 12,
        h in 0.1 .. 5.0,
        area in 1e-3 .. 1.0,
        young in 1e3 .. 1e9,
        load in -1e4 .. 1e4
    ) {
        let model = uniform_chain(num_elements, h, area, young)
            .with_boundary_condition(BoundaryCondition::dirichlet(&[0], 0.0))
            .with_boundary_condition(BoundaryCondition::neumann(&[num_elements], load));
        let solution = model.solve(&SolverOptions::default()).unwrap();

        let ae = area * young;
        for k in 0 ..= num_elements {
            let expected = load * k as f64 * h / ae;
            let tol = 1e-9 * (load * num_elements as f64 * h / ae).abs() + 1e-300;
            prop_assert!((solution.displacements[k] - expected).abs() <= tol);
        }
    }

    #[test]
    fn disjoint_dirichlet_conditions_are_order_independent(
        conditions in Just(vec![
            BoundaryCondition::dirichlet(&[0], 0.0),
            BoundaryCondition::dirichlet(&[3], 0.5),
            BoundaryCondition::dirichlet(&[5], -0.25),
            BoundaryCondition::neumann(&[2], 100.0),
            BoundaryCondition::neumann(&[4], -50.0),
        ]).prop_shuffle()
    ) {
        let reference = uniform_chain(5, 0.5, 0.1, 1e4)
            .with_boundary_condition(BoundaryCondition::dirichlet(&[0], 0.0))
            .with_boundary_condition(BoundaryCondition::dirichlet(&[3], 0.5))
            .with_boundary_condition(BoundaryCondition::dirichlet(&[5], -0.25))
            .with_boundary_condition(BoundaryCondition::neumann(&[2], 100.0))
            .with_boundary_condition(BoundaryCondition::neumann(&[4], -50.0));
        let mut shuffled = uniform_chain(5, 0.5, 0.1, 1e4);
        shuffled.boundary_conditions = conditions;

        let options = SolverOptions::default();
        let expected = reference.solve(&options).unwrap();
        let solution = shuffled.solve(&options).unwrap();
        prop_assert_eq!(solution.displacements, expected.displacements);
    }
}
