use super::{FemState, FileIo};
use crate::base::Dof;
use crate::StrError;
use gemlab::mesh::Mesh;
use std::fmt::Write;
use std::fs::File;
use std::io::Write as IoWrite;

impl FileIo {
    /// Writes a VTU file associated with a single time station for visualization with ParaView
    ///
    /// The nodal displacements are written as a vector field; the von Mises
    /// stress invariant and (if available) the cumulated plastic strain are
    /// written as Gauss-averaged cell fields.
    pub fn write_vtu(&self, mesh: &Mesh, state: &FemState, index: usize) -> Result<(), StrError> {
        if !self.active {
            return Err("FileIo must be activated first");
        }

        let ndim = mesh.ndim;
        let npoint = mesh.points.len();
        let ncell = mesh.cells.len();
        if ncell < 1 {
            return Err("there are no cells to write");
        }

        // output buffer
        let mut buffer = String::new();

        // header
        write!(
            &mut buffer,
            "<?xml version=\"1.0\"?>\n\
             <VTKFile type=\"UnstructuredGrid\" version=\"0.1\" byte_order=\"LittleEndian\">\n\
             <UnstructuredGrid>\n\
             <Piece NumberOfPoints=\"{}\" NumberOfCells=\"{}\">\n",
            npoint, ncell
        )
        .unwrap();

        // nodes: coordinates
        write!(
            &mut buffer,
            "<Points>\n\
             <DataArray type=\"Float64\" NumberOfComponents=\"3\" format=\"ascii\">\n",
        )
        .unwrap();
        for index in 0..npoint {
            for dim in 0..ndim {
                write!(&mut buffer, "{:?} ", mesh.points[index].coords[dim]).unwrap();
            }
            if ndim == 2 {
                write!(&mut buffer, "0.0 ").unwrap();
            }
        }
        write!(
            &mut buffer,
            "\n</DataArray>\n\
             </Points>\n"
        )
        .unwrap();

        // elements: connectivity
        write!(
            &mut buffer,
            "<Cells>\n\
             <DataArray type=\"Int32\" Name=\"connectivity\" format=\"ascii\">\n"
        )
        .unwrap();
        for cell in &mesh.cells {
            if cell.kind.vtk_type().is_none() {
                return Err("cannot generate VTU file because the VTK cell type is not available");
            }
            for p in &cell.points {
                write!(&mut buffer, "{} ", p).unwrap();
            }
        }

        // elements: offsets
        write!(
            &mut buffer,
            "\n</DataArray>\n\
             <DataArray type=\"Int32\" Name=\"offsets\" format=\"ascii\">\n"
        )
        .unwrap();
        let mut offset = 0;
        for cell in &mesh.cells {
            offset += cell.points.len();
            write!(&mut buffer, "{} ", offset).unwrap();
        }

        // elements: types
        write!(
            &mut buffer,
            "\n</DataArray>\n\
             <DataArray type=\"UInt8\" Name=\"types\" format=\"ascii\">\n"
        )
        .unwrap();
        for cell in &mesh.cells {
            if let Some(vtk) = cell.kind.vtk_type() {
                write!(&mut buffer, "{} ", vtk).unwrap();
            }
        }
        write!(
            &mut buffer,
            "\n</DataArray>\n\
             </Cells>\n"
        )
        .unwrap();

        // data: points (displacements)
        write!(&mut buffer, "<PointData Scalars=\"TheScalars\">\n").unwrap();
        write!(
            &mut buffer,
            "<DataArray type=\"Float64\" Name=\"displacement\" NumberOfComponents=\"3\" format=\"ascii\">\n"
        )
        .unwrap();
        for point in &mesh.points {
            let ux = match self.equations.eq(point.id, Dof::Ux).ok() {
                Some(eq) => state.uu[eq],
                None => 0.0,
            };
            let uy = match self.equations.eq(point.id, Dof::Uy).ok() {
                Some(eq) => state.uu[eq],
                None => 0.0,
            };
            let uz = match self.equations.eq(point.id, Dof::Uz).ok() {
                Some(eq) => state.uu[eq],
                None => 0.0,
            };
            write!(&mut buffer, "{:?} {:?} {:?} ", ux, uy, uz).unwrap();
        }
        write!(&mut buffer, "\n</DataArray>\n").unwrap();
        write!(&mut buffer, "</PointData>\n").unwrap();

        // data: cells (Gauss-averaged values)
        let has_plastic_strain = state
            .gauss
            .iter()
            .all(|gs| gs.all.iter().all(|ls| ls.internal_values.dim() > 0));
        write!(&mut buffer, "<CellData Scalars=\"TheCellScalars\">\n").unwrap();
        write!(
            &mut buffer,
            "<DataArray type=\"Float64\" Name=\"sigma_d\" NumberOfComponents=\"1\" format=\"ascii\">\n"
        )
        .unwrap();
        for cell in &mesh.cells {
            let gs = &state.gauss[cell.id];
            let mut sigma_d = 0.0;
            for ls in &gs.all {
                sigma_d += ls.stress.invariant_sigma_d();
            }
            write!(&mut buffer, "{:?} ", sigma_d / (gs.all.len() as f64)).unwrap();
        }
        write!(&mut buffer, "\n</DataArray>\n").unwrap();
        if has_plastic_strain {
            write!(
                &mut buffer,
                "<DataArray type=\"Float64\" Name=\"plastic_strain\" NumberOfComponents=\"1\" format=\"ascii\">\n"
            )
            .unwrap();
            for cell in &mesh.cells {
                let gs = &state.gauss[cell.id];
                let mut p = 0.0;
                for ls in &gs.all {
                    p += ls.internal_values[0];
                }
                write!(&mut buffer, "{:?} ", p / (gs.all.len() as f64)).unwrap();
            }
            write!(&mut buffer, "\n</DataArray>\n").unwrap();
        }
        write!(&mut buffer, "</CellData>\n").unwrap();

        // footer
        write!(
            &mut buffer,
            "</Piece>\n\
             </UnstructuredGrid>\n\
             </VTKFile>\n"
        )
        .unwrap();

        // write file
        let path = self.path_vtu(index);
        let mut file = File::create(&path).map_err(|_| "cannot create VTU file")?;
        file.write_all(buffer.as_bytes()).map_err(|_| "cannot write VTU file")?;
        Ok(())
    }

    /// Writes the PVD file (time-series collection) for visualization with ParaView
    pub fn write_pvd(&self) -> Result<(), StrError> {
        if !self.active {
            return Err("FileIo must be activated first");
        }

        // header
        let mut buffer = String::new();
        write!(
            &mut buffer,
            "<?xml version=\"1.0\"?>\n\
             <VTKFile type=\"Collection\" version=\"0.1\" byte_order=\"LittleEndian\">\n\
             <Collection>\n"
        )
        .unwrap();

        // add VTU entries to the PVD file
        for index in &self.indices {
            let vtu_fn = self.path_vtu(*index);
            write!(
                &mut buffer,
                "<DataSet timestep=\"{:?}\" file=\"{}\" />\n",
                self.times[*index], vtu_fn
            )
            .unwrap();
        }

        // footer
        write!(&mut buffer, "</Collection>\n</VTKFile>\n").unwrap();

        // write file
        let path = self.path_pvd();
        let mut file = File::create(&path).map_err(|_| "cannot create PVD file")?;
        file.write_all(buffer.as_bytes()).map_err(|_| "cannot write PVD file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use crate::base::{Config, Elem, ParamSolid, DEFAULT_TEST_OUT_DIR};
    use crate::fem::{FemBase, FemState, FileIo};
    use gemlab::mesh::Samples;
    use std::fs;

    #[test]
    fn write_vtu_captures_errors() {
        let mesh = Samples::one_qua4();
        let p1 = ParamSolid::sample_linear_elastic();
        let base = FemBase::new(&mesh, [(1, Elem::Solid(p1))]).unwrap();
        let config = Config::new(&mesh);
        let state = FemState::new(&mesh, &base, &config).unwrap();
        let file_io = FileIo::new();
        assert_eq!(
            file_io.write_vtu(&mesh, &state, 0).err(),
            Some("FileIo must be activated first")
        );
        assert_eq!(file_io.write_pvd().err(), Some("FileIo must be activated first"));
    }

    #[test]
    fn write_vtu_and_pvd_work() {
        let mesh = Samples::one_qua4();
        let p1 = ParamSolid::sample_von_mises();
        let base = FemBase::new(&mesh, [(1, Elem::Solid(p1))]).unwrap();
        let config = Config::new(&mesh);
        let mut state = FemState::new(&mesh, &base, &config).unwrap();
        state.uu[0] = 0.1;

        let mut file_io = FileIo::new();
        file_io
            .activate(&mesh, &base, "test_write_vtu_and_pvd", Some(DEFAULT_TEST_OUT_DIR))
            .unwrap();
        file_io.write_state(&state).unwrap();
        file_io.write_vtu(&mesh, &state, 0).unwrap();
        file_io.write_pvd().unwrap();

        let vtu = fs::read_to_string(&file_io.path_vtu(0)).unwrap();
        assert!(vtu.contains("<VTKFile type=\"UnstructuredGrid\""));
        assert!(vtu.contains("Name=\"displacement\""));
        assert!(vtu.contains("Name=\"sigma_d\""));
        assert!(vtu.contains("Name=\"plastic_strain\""));

        let pvd = fs::read_to_string(&file_io.path_pvd()).unwrap();
        assert!(pvd.contains("<VTKFile type=\"Collection\""));
        assert!(pvd.contains("timestep=\"0.0\""));
    }
}
